use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const UPDATE_WINDOW_DAYS: i64 = 7;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(default)]
    pub account_holder_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub upi_id: String,
    #[serde(default, skip_serializing)]
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl PaymentMethod {
    /// The form the backend stores: digits-only account number, upper-case
    /// IFSC and lower-case UPI id, with whitespace stripped from all three.
    pub fn normalized(&self) -> Self {
        let without_spaces = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();

        Self {
            account_holder_name: self.account_holder_name.trim().to_string(),
            account_number: self
                .account_number
                .chars()
                .filter(char::is_ascii_digit)
                .collect(),
            ifsc_code: without_spaces(&self.ifsc_code).to_uppercase(),
            bank_name: self.bank_name.trim().to_string(),
            upi_id: without_spaces(&self.upi_id).to_lowercase(),
            last_updated_at: self.last_updated_at,
        }
    }
}

/// Whether payout details may be edited again, as last reported by the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateWindow {
    Open,
    Closed { next_update: DateTime<Utc> },
}

impl UpdateWindow {
    pub fn at(last_updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match last_updated_at {
            Some(last) if now - last < Duration::days(UPDATE_WINDOW_DAYS) => UpdateWindow::Closed {
                next_update: last + Duration::days(UPDATE_WINDOW_DAYS),
            },
            _ => UpdateWindow::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, UpdateWindow::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_closes_for_seven_days() {
        let last = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();

        let window = UpdateWindow::at(Some(last), last + Duration::days(3));
        assert_eq!(
            window,
            UpdateWindow::Closed {
                next_update: Utc.with_ymd_and_hms(2026, 10, 8, 12, 0, 0).unwrap()
            }
        );

        assert!(UpdateWindow::at(Some(last), last + Duration::days(7)).is_open());
        assert!(UpdateWindow::at(None, last).is_open());
    }

    #[test]
    fn payout_details_are_normalized() {
        let typed = PaymentMethod {
            account_holder_name: "  Asha Rao ".to_string(),
            account_number: "0012 3456-78".to_string(),
            ifsc_code: "sbin 0000001".to_string(),
            bank_name: " SBI ".to_string(),
            upi_id: "Asha@SBI ".to_string(),
            last_updated_at: None,
        };

        let pm = typed.normalized();
        assert_eq!(pm.account_holder_name, "Asha Rao");
        assert_eq!(pm.account_number, "0012345678");
        assert_eq!(pm.ifsc_code, "SBIN0000001");
        assert_eq!(pm.bank_name, "SBI");
        assert_eq!(pm.upi_id, "asha@sbi");
        assert_eq!(pm.normalized(), pm);
    }

    #[test]
    fn last_update_is_not_sent_back() {
        let pm: PaymentMethod = serde_json::from_str(
            r#"{"accountHolderName":"A","accountNumber":"1","ifscCode":"SBIN0001","lastUpdatedAt":"2026-10-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert!(pm.last_updated_at.is_some());
        let body = serde_json::to_value(&pm).unwrap();
        assert!(body.get("lastUpdatedAt").is_none());
        assert_eq!(body["ifscCode"], "SBIN0001");
    }
}
