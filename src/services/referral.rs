use super::admin::require_admin;
use super::ServiceError;
use crate::models::referrals::{ReferralCheck, ReferralLink, ReferralSettings};
use crate::models::users::User;
use crate::repositories::api::ApiError;
use crate::repositories::referral::ReferralRepository;
use crate::validation;

pub const INVALID_CODE: &str = "Invalid referral code";

#[derive(Clone)]
pub struct ReferralService {
    repository: ReferralRepository,
}

impl ReferralService {
    pub fn new(repository: ReferralRepository) -> Self {
        Self { repository }
    }

    /// `None` while the programme is switched off.
    pub async fn link(&self, user: &User) -> Result<Option<ReferralLink>, ServiceError> {
        let link = self.repository.link(&user.phone).await?;
        Ok(link.is_active.then_some(link))
    }

    /// Any answer short of a confirmed code, including a 404, is `Invalid`.
    pub async fn verify(&self, code: &str) -> Result<ReferralCheck, ServiceError> {
        let code = validation::normalize_referral_code(code);
        if !validation::referral_code_ready(&code) {
            return Ok(ReferralCheck::NotReady);
        }

        match self.repository.verify(&code).await {
            Ok(Some(found)) => Ok(ReferralCheck::Valid {
                referrer_name: found.referrer_name,
            }),
            Ok(None) => Ok(ReferralCheck::Invalid),
            Err(ApiError::Rejected { status, message, .. }) => {
                log::debug!("Referral code {} refused ({}): {}", code, status, message);
                Ok(ReferralCheck::Invalid)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn settings(&self, admin: &User) -> Result<ReferralSettings, ServiceError> {
        require_admin(admin)?;
        Ok(self.repository.settings(&admin.phone).await?)
    }

    pub async fn update_settings(
        &self,
        admin: &User,
        settings: &ReferralSettings,
    ) -> Result<ReferralSettings, ServiceError> {
        require_admin(admin)?;
        validation::validate_referral_rewards(settings.referrer_reward, settings.referred_reward)?;

        let saved = self
            .repository
            .update_settings(&admin.phone, settings)
            .await?;
        log::info!(
            "Referral settings updated by {}: {}/{} active={}",
            admin.phone,
            saved.referrer_reward,
            saved.referred_reward,
            saved.is_active
        );
        Ok(saved)
    }
}
