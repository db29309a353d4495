use serde_json::json;

use super::api::{acknowledge, into_data, ApiClient, ApiError};
use super::segment;
use crate::models::transactions::{NewTransaction, Transaction, TransactionFilter};
use crate::models::users::WalletBalance;

#[derive(Clone)]
pub struct WalletRepository {
    api: ApiClient,
}

impl WalletRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn balance(&self, user_id: &str) -> Result<f64, ApiError> {
        let response = self
            .api
            .get::<WalletBalance>(&format!("/wallet/balance/{}", segment(user_id)), &[])
            .await?;

        Ok(into_data(response, "balance")?.balance)
    }

    pub async fn create_recharge(&self, user_id: &str, amount: u64) -> Result<Transaction, ApiError> {
        let response = self
            .api
            .post("/wallet/recharge", &NewTransaction { user_id, amount })
            .await?;

        into_data(response, "recharge transaction")
    }

    pub async fn update_utr(&self, transaction_id: &str, utr: &str) -> Result<(), ApiError> {
        let response = self
            .api
            .put::<_, serde_json::Value>(
                &format!("/wallet/recharge/{}/utr", segment(transaction_id)),
                &json!({ "utr": utr }),
            )
            .await?;

        acknowledge(response, "Failed to update UTR")
    }

    pub async fn create_withdrawal(
        &self,
        user_id: &str,
        amount: u64,
    ) -> Result<Transaction, ApiError> {
        let response = self
            .api
            .post("/wallet/withdraw", &NewTransaction { user_id, amount })
            .await?;

        into_data(response, "withdrawal transaction")
    }

    pub async fn transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .api
            .get::<Vec<Transaction>>(
                &format!("/wallet/transactions/{}", segment(user_id)),
                &filter.query(),
            )
            .await?;

        if response.success && response.data.is_none() {
            return Ok(Vec::new());
        }
        into_data(response, "transactions")
    }
}
