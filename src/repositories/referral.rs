use super::api::{into_data, ApiClient, ApiError};
use super::segment;
use crate::models::referrals::{
    ReferralLink, ReferralSettings, ReferralSettingsUpdate, ReferralVerification,
};

#[derive(Clone)]
pub struct ReferralRepository {
    api: ApiClient,
}

impl ReferralRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn link(&self, user_id: &str) -> Result<ReferralLink, ApiError> {
        let response = self
            .api
            .get(&format!("/referral/link/{}", segment(user_id)), &[])
            .await?;

        into_data(response, "referral link")
    }

    /// `None` unless the backend reports the code as valid.
    pub async fn verify(&self, code: &str) -> Result<Option<ReferralVerification>, ApiError> {
        let response = self
            .api
            .get::<ReferralVerification>(&format!("/referral/verify/{}", segment(code)), &[])
            .await?;

        if response.success && response.valid.unwrap_or(false) {
            Ok(Some(response.data.unwrap_or_default()))
        } else {
            Ok(None)
        }
    }

    pub async fn settings(&self, admin_user_id: &str) -> Result<ReferralSettings, ApiError> {
        let response = self
            .api
            .get(
                "/referral/settings",
                &[("adminUserId", admin_user_id.to_string())],
            )
            .await?;

        into_data(response, "referral settings")
    }

    pub async fn update_settings(
        &self,
        admin_user_id: &str,
        settings: &ReferralSettings,
    ) -> Result<ReferralSettings, ApiError> {
        let response = self
            .api
            .put::<_, ReferralSettings>(
                "/referral/settings",
                &ReferralSettingsUpdate {
                    admin_user_id,
                    settings,
                },
            )
            .await?;

        if response.success && response.data.is_none() {
            return Ok(settings.clone());
        }
        into_data(response, "referral settings")
    }
}
