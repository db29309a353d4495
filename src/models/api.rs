use serde::{Deserialize, Serialize};

/// Envelope every backend endpoint answers with.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub rate_limit: Option<serde_json::Value>,
    #[serde(default)]
    pub next_update_date: Option<String>,
    #[serde(default)]
    pub valid: Option<bool>,
}

impl<T> ApiResponse<T> {
    pub fn message_or(&self, fallback: &str) -> String {
        match (&self.message, &self.error) {
            (Some(message), Some(error)) => format!("{}\n\nError: {}", message, error),
            (Some(message), None) => message.clone(),
            (None, _) => fallback.to_string(),
        }
    }
}
