use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transactions::Transaction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::All => "all",
            TimeRange::Today => "today",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub today: f64,
    #[serde(default)]
    pub this_week: f64,
    #[serde(default)]
    pub this_month: f64,
}

pub type EarningsHistory = Vec<Transaction>;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStats {
    #[serde(default)]
    pub clicks_today: u32,
    #[serde(default)]
    pub max_clicks: u32,
    #[serde(default)]
    pub clicks_remaining: u32,
    #[serde(default)]
    pub can_earn: bool,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub max_earning: f64,
    #[serde(default)]
    pub is_cooldown_active: bool,
    #[serde(default)]
    pub cooldown_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consecutive_clicks: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest<'a> {
    pub user_id: &'a str,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickReward {
    #[serde(default)]
    pub earning_amount: f64,
    #[serde(default)]
    pub consecutive_clicks: Option<u32>,
    #[serde(default)]
    pub cooldown_warning: Option<String>,
    #[serde(default)]
    pub cooldown_remaining: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_stats_parse_cooldown() {
        let stats: ClickStats = serde_json::from_str(
            r#"{"clicksToday":3,"maxClicks":10,"clicksRemaining":7,"canEarn":true,"tier":"silver","isCooldownActive":true,"cooldownUntil":"2026-10-19T10:02:00.000Z","consecutiveClicks":5}"#,
        )
        .unwrap();

        assert!(stats.is_cooldown_active);
        assert_eq!(stats.consecutive_clicks, 5);
        assert_eq!(
            stats.cooldown_until.unwrap().to_rfc3339(),
            "2026-10-19T10:02:00+00:00"
        );
    }
}
