use super::api::{into_data, ApiClient, ApiError};
use crate::models::users::{LoginRequest, RegisterRequest, User};

#[derive(Clone)]
pub struct AuthRepository {
    api: ApiClient,
}

impl AuthRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<User, ApiError> {
        let response = self
            .api
            .post("/auth/login", &LoginRequest { phone, password })
            .await?;

        into_data(response, "user")
    }

    pub async fn register(
        &self,
        phone: &str,
        name: &str,
        password: &str,
        referral_code: Option<&str>,
    ) -> Result<User, ApiError> {
        let response = self
            .api
            .post(
                "/auth/register",
                &RegisterRequest {
                    phone,
                    name,
                    password,
                    referral_code,
                },
            )
            .await?;

        into_data(response, "user")
    }
}
