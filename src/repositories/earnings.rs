use super::api::{into_data, ApiClient, ApiError};
use super::segment;
use crate::models::earnings::{
    ClickRequest, ClickReward, ClickStats, EarningsHistory, EarningsSummary, TimeRange,
};

/// A credited click together with the server's message.
#[derive(Clone, Debug)]
pub struct ClickResult {
    pub reward: ClickReward,
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct EarningsRepository {
    api: ApiClient,
}

impl EarningsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn summary(
        &self,
        user_id: &str,
        range: TimeRange,
    ) -> Result<EarningsSummary, ApiError> {
        let response = self
            .api
            .get(
                &format!("/earnings/summary/{}", segment(user_id)),
                &[("timeRange", range.to_string())],
            )
            .await?;

        into_data(response, "earnings summary")
    }

    pub async fn history(
        &self,
        user_id: &str,
        range: TimeRange,
        limit: usize,
    ) -> Result<EarningsHistory, ApiError> {
        let response = self
            .api
            .get::<EarningsHistory>(
                &format!("/earnings/history/{}", segment(user_id)),
                &[("timeRange", range.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        if response.success && response.data.is_none() {
            return Ok(Vec::new());
        }
        into_data(response, "earnings history")
    }

    /// Errors with [`ApiError::Cooldown`] when the backend answers 429.
    pub async fn click(&self, user_id: &str) -> Result<ClickResult, ApiError> {
        let response = self
            .api
            .post::<_, ClickReward>("/earnings/click", &ClickRequest { user_id })
            .await?;
        let message = response.message.clone();

        // Some deployments answer 200 with a cooldown figure instead of 429.
        if !response.success {
            if let Some(remaining_secs) = response
                .data
                .as_ref()
                .and_then(|reward| reward.cooldown_remaining)
            {
                return Err(ApiError::Cooldown {
                    remaining_secs,
                    message: response.message_or("Please wait before clicking again."),
                });
            }
        }

        let reward = into_data(response, "click reward")?;
        Ok(ClickResult { reward, message })
    }

    pub async fn click_stats(&self, user_id: &str) -> Result<ClickStats, ApiError> {
        let response = self
            .api
            .get(&format!("/earnings/click-stats/{}", segment(user_id)), &[])
            .await?;

        into_data(response, "click stats")
    }
}
