use super::api::{into_data, ApiClient, ApiError};
use super::segment;
use crate::models::payment_methods::PaymentMethod;

#[derive(Clone)]
pub struct PaymentMethodRepository {
    api: ApiClient,
}

impl PaymentMethodRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `None` when the user has never saved payout details.
    pub async fn get(&self, user_id: &str) -> Result<Option<PaymentMethod>, ApiError> {
        let response = self
            .api
            .get::<PaymentMethod>(&format!("/payment-methods/{}", segment(user_id)), &[])
            .await?;

        if response.success && response.data.is_none() {
            return Ok(None);
        }
        into_data(response, "payment method").map(Some)
    }

    pub async fn save(
        &self,
        user_id: &str,
        payment_method: &PaymentMethod,
    ) -> Result<PaymentMethod, ApiError> {
        let response = self
            .api
            .post(&format!("/payment-methods/{}", segment(user_id)), payment_method)
            .await?;

        into_data(response, "payment method")
    }

    pub async fn get_for_admin(&self, user_id: &str) -> Result<Option<PaymentMethod>, ApiError> {
        let response = self
            .api
            .get::<PaymentMethod>(
                &format!("/payment-methods/admin/{}", segment(user_id)),
                &[],
            )
            .await?;

        if response.success && response.data.is_none() {
            return Ok(None);
        }
        into_data(response, "payment method").map(Some)
    }
}
