use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::models::api::ApiResponse;

/// Used when the backend rejects a click without saying how long to wait.
pub const DEFAULT_COOLDOWN_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error, please try again")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        next_update_date: Option<String>,
    },
    #[error("{message}")]
    Cooldown {
        remaining_secs: u64,
        message: String,
    },
    #[error("Server response is missing {0}")]
    MissingData(&'static str),
}

impl ApiError {
    pub fn is_cooldown(&self) -> bool {
        matches!(self, ApiError::Cooldown { .. })
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request::<(), T>(Method::GET, path, query, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::DELETE, path, &[], Some(body)).await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request_id = Uuid::new_v4().hyphenated().to_string();
        let url = format!("{}{}", self.base_url, path);
        log::debug!("[{}] {} {}", request_id, method, url);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header("X-Request-Id", &request_id);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            log::error!("[{}] {} {} failed: {}", request_id, method, url, e);
            ApiError::Network(e)
        })?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| {
                log::warn!("[{}] {} returned a non-JSON body", request_id, status);
                Value::Null
            });
            return Err(rejection(status, &body, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!("[{}] {} returned a non-JSON body: {}", request_id, status, e);
            ApiError::Decode(e)
        })
    }
}

/// `text` is the raw body, used as the message when the body is not JSON.
fn rejection(status: StatusCode, body: &Value, text: &str) -> ApiError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            let text = text.trim();
            (body.is_null() && !text.is_empty()).then(|| text.to_string())
        });

    if status == StatusCode::TOO_MANY_REQUESTS {
        let remaining_secs = body
            .get("data")
            .and_then(|d| d.get("cooldownRemaining"))
            .or_else(|| body.get("cooldownRemaining"))
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_COOLDOWN_SECS);

        return ApiError::Cooldown {
            remaining_secs,
            message: message.unwrap_or_else(|| "Please wait before clicking again.".to_string()),
        };
    }

    let mut message = message.unwrap_or_else(|| format!("Request failed with status {}", status));
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        message = format!("{}\n\nError: {}", message, error);
    }

    ApiError::Rejected {
        status: status.as_u16(),
        message,
        next_update_date: body
            .get("nextUpdateDate")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Unwraps a successful envelope, turning `success: false` into a rejection.
pub fn into_data<T>(response: ApiResponse<T>, what: &'static str) -> Result<T, ApiError> {
    if !response.success {
        return Err(ApiError::Rejected {
            status: StatusCode::OK.as_u16(),
            message: response.message_or(&format!("Failed to load {}", what)),
            next_update_date: response.next_update_date,
        });
    }

    response.data.ok_or(ApiError::MissingData(what))
}

/// For endpoints whose only useful answer is `success`.
pub fn acknowledge(response: ApiResponse<Value>, fallback: &str) -> Result<(), ApiError> {
    if response.success {
        return Ok(());
    }

    Err(ApiError::Rejected {
        status: StatusCode::OK.as_u16(),
        message: response.message_or(fallback),
        next_update_date: None,
    })
}
