use serde_json::Value;

use super::api::{acknowledge, into_data, ApiClient, ApiError};
use super::segment;
use crate::models::admin::{AdminAction, LossTracking, RestrictRequest, StatusUpdate};
use crate::models::transactions::{Transaction, TransactionFilter, TransactionStatus};
use crate::models::users::{User, UserUpdate};

#[derive(Clone)]
pub struct AdminRepository {
    api: ApiClient,
}

impl AdminRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.api.get("/admin/users", &[]).await?;
        into_data(response, "users")
    }

    pub async fn transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, ApiError> {
        let response = self.api.get("/admin/transactions", &filter.query()).await?;
        into_data(response, "transactions")
    }

    pub async fn update_transaction_status(
        &self,
        transaction_id: &str,
        status: &TransactionStatus,
        admin_user_id: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .api
            .put::<_, Value>(
                &format!("/admin/transactions/{}/status", segment(transaction_id)),
                &StatusUpdate {
                    status,
                    admin_user_id,
                },
            )
            .await?;

        acknowledge(response, "Failed to update transaction")
    }

    pub async fn delete_user(&self, user_id: &str, admin_user_id: &str) -> Result<(), ApiError> {
        let response = self
            .api
            .delete::<_, Value>(
                &format!("/admin/users/{}", segment(user_id)),
                &AdminAction { admin_user_id },
            )
            .await?;

        acknowledge(response, "Failed to delete user")
    }

    pub async fn restrict_user(
        &self,
        user_id: &str,
        admin_user_id: &str,
        is_restricted: bool,
    ) -> Result<(), ApiError> {
        let response = self
            .api
            .put::<_, Value>(
                &format!("/admin/users/{}/restrict", segment(user_id)),
                &RestrictRequest {
                    admin_user_id,
                    is_restricted,
                },
            )
            .await?;

        acknowledge(response, "Failed to restrict/unrestrict user")
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        admin_user_id: &str,
        update: &UserUpdate,
    ) -> Result<(), ApiError> {
        let mut body = serde_json::to_value(update)?;
        body["adminUserId"] = Value::String(admin_user_id.to_string());

        let response = self
            .api
            .put::<_, Value>(&format!("/admin/users/{}", segment(user_id)), &body)
            .await?;

        acknowledge(response, "Failed to update user")
    }

    pub async fn loss_tracking(&self, admin_user_id: &str) -> Result<LossTracking, ApiError> {
        let response = self
            .api
            .get(
                "/admin/loss-tracking",
                &[("adminUserId", admin_user_id.to_string())],
            )
            .await?;

        into_data(response, "loss tracking")
    }
}
