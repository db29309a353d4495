use serde_json::Value;

use super::api::{into_data, ApiClient, ApiError};
use super::segment;
use crate::models::api::ApiResponse;
use crate::models::matches::{Match, MatchList};

/// A match list together with any rate-limit notice the proxy attached.
#[derive(Clone, Debug, Default)]
pub struct MatchFetch {
    pub matches: MatchList,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct CricketRepository {
    api: ApiClient,
}

impl CricketRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn matches(&self) -> Result<MatchFetch, ApiError> {
        let response = self.api.get::<Value>("/cricket/matches", &[]).await?;
        let notice = rate_limit_notice(&response);
        let data = into_data(response, "matches")?;

        Ok(MatchFetch {
            matches: MatchList::from_payload(&data),
            notice,
        })
    }

    pub async fn current_matches(&self) -> Result<Vec<Match>, ApiError> {
        self.flat_list("/cricket/matches/current").await
    }

    pub async fn upcoming_matches(&self) -> Result<Vec<Match>, ApiError> {
        self.flat_list("/cricket/matches/upcoming").await
    }

    pub async fn match_details(&self, match_id: &str) -> Result<Value, ApiError> {
        let response = self
            .api
            .get::<Value>(&format!("/cricket/matches/{}", segment(match_id)), &[])
            .await?;

        into_data(response, "match details")
    }

    pub async fn series(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.api.get::<Value>("/cricket/series", &[]).await?;
        let data = into_data(response, "series")?;

        Ok(match data {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        })
    }

    async fn flat_list(&self, path: &str) -> Result<Vec<Match>, ApiError> {
        let response = self.api.get::<Value>(path, &[]).await?;
        let data = into_data(response, "matches")?;

        // Same probing as the combined endpoint, with the payload as the only section.
        let wrapped = serde_json::json!({ "live": data });
        Ok(MatchList::from_payload(&wrapped).live)
    }
}

fn rate_limit_notice<T>(response: &ApiResponse<T>) -> Option<String> {
    match (&response.rate_limit, &response.message) {
        (Some(limit), Some(message)) if !limit.is_null() && *limit != Value::Bool(false) => {
            Some(message.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notice_needs_both_flag_and_message() {
        let response: ApiResponse<Value> = serde_json::from_value(json!({
            "success": true,
            "message": "Serving cached data",
            "rateLimit": {"remaining": 0}
        }))
        .unwrap();
        assert_eq!(rate_limit_notice(&response).as_deref(), Some("Serving cached data"));

        let response: ApiResponse<Value> =
            serde_json::from_value(json!({"success": true, "message": "ok"})).unwrap();
        assert!(rate_limit_notice(&response).is_none());
    }
}
