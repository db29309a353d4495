use serde::{Deserialize, Serialize};

fn default_reward() -> f64 {
    10.0
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSettings {
    #[serde(default = "default_reward")]
    pub referrer_reward: f64,
    #[serde(default = "default_reward")]
    pub referred_reward: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            referrer_reward: default_reward(),
            referred_reward: default_reward(),
            is_active: default_active(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSettingsUpdate<'a> {
    pub admin_user_id: &'a str,
    #[serde(flatten)]
    pub settings: &'a ReferralSettings,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralLink {
    #[serde(default)]
    pub referral_code: String,
    #[serde(default)]
    pub referral_link: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub total_referrals: Option<u64>,
    #[serde(default)]
    pub total_earnings: Option<f64>,
}

/// `data` of a successful `/referral/verify` answer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralVerification {
    #[serde(default)]
    pub referrer_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReferralCheck {
    /// Fewer than the minimum characters typed; no lookup was made.
    NotReady,
    Valid { referrer_name: Option<String> },
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let settings: ReferralSettings =
            serde_json::from_str(r#"{"referrerReward":25,"totalRewardAmount":99}"#).unwrap();

        assert_eq!(settings.referrer_reward, 25.0);
        assert_eq!(settings.referred_reward, 10.0);
        assert!(settings.is_active);
    }

    #[test]
    fn update_flattens_settings() {
        let settings = ReferralSettings::default();
        let body = serde_json::to_value(ReferralSettingsUpdate {
            admin_user_id: "9999999999",
            settings: &settings,
        })
        .unwrap();

        assert_eq!(body["adminUserId"], "9999999999");
        assert_eq!(body["referrerReward"], 10.0);
        assert_eq!(body["isActive"], true);
    }
}
