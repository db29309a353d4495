use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentType {
    Recharge,
    Withdrawal,
    ClickEarn,
    Order,
    Other(String),
}

impl From<String> for PaymentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "recharge" => PaymentType::Recharge,
            "withdrawal" => PaymentType::Withdrawal,
            "click-earn" => PaymentType::ClickEarn,
            "order" => PaymentType::Order,
            _ => PaymentType::Other(value),
        }
    }
}

impl From<PaymentType> for String {
    fn from(value: PaymentType) -> Self {
        value.as_str().to_string()
    }
}

impl PaymentType {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentType::Recharge => "recharge",
            PaymentType::Withdrawal => "withdrawal",
            PaymentType::ClickEarn => "click-earn",
            PaymentType::Order => "order",
            PaymentType::Other(other) => other,
        }
    }

    /// Credits add to the wallet, everything else is a debit.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            PaymentType::Recharge | PaymentType::ClickEarn | PaymentType::Order
        )
    }

    pub fn label(&self) -> String {
        match self {
            PaymentType::ClickEarn => "Click Earn".to_string(),
            other => {
                let name = other.as_str();
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            }
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Processing,
    Pending,
    Completed,
    Cancelled,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Processing => "processing",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Cancelled | TransactionStatus::Failed
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub payment_type: PaymentType,
    pub amount: f64,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Transaction {
    /// A UTR can only be attached while a recharge waits for verification.
    pub fn accepts_utr(&self) -> bool {
        self.payment_type == PaymentType::Recharge && self.status == TransactionStatus::Processing
    }

    pub fn signed_amount(&self) -> f64 {
        if self.payment_type.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub payment_type: Option<PaymentType>,
}

impl TransactionFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = &self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(payment_type) = &self.payment_type {
            params.push(("paymentType", payment_type.to_string()));
        }
        params
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction<'a> {
    pub user_id: &'a str,
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_payment_types_are_preserved() {
        let tx: Transaction = serde_json::from_str(
            r#"{"_id":"t1","paymentType":"bonus","amount":10,"status":"completed"}"#,
        )
        .unwrap();

        assert_eq!(tx.payment_type, PaymentType::Other("bonus".to_string()));
        assert_eq!(tx.payment_type.label(), "Bonus");
        assert!(tx.status.is_terminal());
    }

    #[test]
    fn withdrawals_are_debits() {
        let tx: Transaction = serde_json::from_str(
            r#"{"_id":"t2","paymentType":"withdrawal","amount":300,"status":"processing"}"#,
        )
        .unwrap();

        assert_eq!(tx.signed_amount(), -300.0);
        assert!(!tx.accepts_utr());
        assert_eq!(PaymentType::ClickEarn.label(), "Click Earn");
    }

    #[test]
    fn filter_builds_query_pairs() {
        let filter = TransactionFilter {
            status: Some(TransactionStatus::Processing),
            payment_type: Some(PaymentType::ClickEarn),
        };

        assert_eq!(
            filter.query(),
            vec![
                ("status", "processing".to_string()),
                ("paymentType", "click-earn".to_string())
            ]
        );
        assert!(TransactionFilter::default().query().is_empty());
    }
}
