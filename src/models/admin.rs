use serde::{Deserialize, Serialize};

use super::transactions::TransactionStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_transactions: usize,
    pub pending_transactions: usize,
    pub total_balance: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate<'a> {
    pub status: &'a TransactionStatus,
    pub admin_user_id: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictRequest<'a> {
    pub admin_user_id: &'a str,
    pub is_restricted: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAction<'a> {
    pub admin_user_id: &'a str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    User,
    Admin,
    All,
}

/// Per-user loss figures reported by the backend; kept loose since the page
/// only renders them.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LossTracking {
    #[serde(default)]
    pub total_loss: f64,
    #[serde(default)]
    pub total_recharged: f64,
    #[serde(default)]
    pub total_withdrawn: f64,
    #[serde(default)]
    pub total_earned: f64,
    #[serde(default)]
    pub users: Vec<serde_json::Value>,
}
