use super::ServiceError;
use crate::models::users::User;
use crate::repositories::auth::AuthRepository;
use crate::validation;

pub struct Registration<'a> {
    pub phone: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    pub referral_code: Option<&'a str>,
    pub accepted_terms: bool,
}

#[derive(Clone)]
pub struct AuthService {
    repository: AuthRepository,
}

impl AuthService {
    pub fn new(repository: AuthRepository) -> Self {
        Self { repository }
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<User, ServiceError> {
        let phone = phone.trim();
        validation::validate_login(phone, password)?;

        let user = self.repository.login(phone, password).await?;
        log::info!("Logged in as {}", user.phone);
        Ok(user)
    }

    pub async fn register(&self, registration: Registration<'_>) -> Result<User, ServiceError> {
        let phone = registration.phone.trim();
        validation::validate_registration(
            phone,
            registration.name,
            registration.password,
            registration.accepted_terms,
        )?;

        let referral_code = registration
            .referral_code
            .map(validation::normalize_referral_code)
            .filter(|code| !code.is_empty());

        let user = self
            .repository
            .register(
                phone,
                registration.name.trim(),
                registration.password,
                referral_code.as_deref(),
            )
            .await?;
        log::info!("Registered {}", user.phone);
        Ok(user)
    }
}
