use rand::seq::SliceRandom;

use super::ServiceError;
use crate::models::transactions::{PaymentType, Transaction, TransactionFilter};
use crate::models::users::User;
use crate::repositories::wallet::WalletRepository;
use crate::settings::{self, FALLBACK_UPI_ID};
use crate::validation;

const RECENT_RECHARGES: usize = 3;

/// A freshly created recharge and the UPI details to pay it with.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentRequest {
    pub transaction: Transaction,
    pub amount: u64,
    pub upi_id: String,
    /// Encoded into the QR code; carries a transaction note.
    pub qr_payload: String,
    /// Opens a UPI app directly.
    pub deep_link: String,
}

#[derive(Clone)]
pub struct WalletService {
    repository: WalletRepository,
    app: settings::App,
}

impl WalletService {
    pub fn new(repository: WalletRepository, app: settings::App) -> Self {
        Self { repository, app }
    }

    pub async fn balance(&self, user: &User) -> Result<f64, ServiceError> {
        Ok(self.repository.balance(&user.phone).await?)
    }

    pub async fn recharge(&self, user: &User, amount: &str) -> Result<PaymentRequest, ServiceError> {
        let amount = validation::parse_amount(amount)?;
        validation::validate_recharge_amount(amount)?;

        let transaction = self
            .repository
            .create_recharge(&user.phone, amount)
            .await
            .inspect_err(|e| log::error!("Recharge failed for {}: {}", user.phone, e))?;
        log::info!("Recharge {} created for {} ({})", transaction.id, user.phone, amount);

        let upi_id = choose_upi_id(&self.app.upi_ids);
        Ok(PaymentRequest {
            qr_payload: upi_uri(&upi_id, &self.app.merchant_name, amount, Some(&self.app.currency)),
            deep_link: upi_uri(&upi_id, &self.app.merchant_name, amount, None),
            transaction,
            amount,
            upi_id,
        })
    }

    /// `balance` is the client's cached figure; the backend has the final say.
    pub async fn withdraw(
        &self,
        user: &User,
        amount: &str,
        balance: f64,
    ) -> Result<Transaction, ServiceError> {
        let amount = validation::parse_amount(amount)?;
        validation::validate_withdrawal_amount(amount, balance)?;

        let transaction = self
            .repository
            .create_withdrawal(&user.phone, amount)
            .await
            .inspect_err(|e| log::error!("Withdrawal failed for {}: {}", user.phone, e))?;
        log::info!("Withdrawal {} created for {} ({})", transaction.id, user.phone, amount);
        Ok(transaction)
    }

    pub async fn submit_utr(&self, transaction_id: &str, utr: &str) -> Result<(), ServiceError> {
        let utr = validation::validate_utr(utr)?;
        self.repository.update_utr(transaction_id, utr).await?;
        log::info!("UTR attached to {}", transaction_id);
        Ok(())
    }

    pub async fn transactions(
        &self,
        user: &User,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.repository.transactions(&user.phone, filter).await?)
    }

    pub async fn recent_recharges(&self, user: &User) -> Result<Vec<Transaction>, ServiceError> {
        let filter = TransactionFilter {
            status: None,
            payment_type: Some(PaymentType::Recharge),
        };
        let mut recharges = self.transactions(user, &filter).await?;
        recharges.truncate(RECENT_RECHARGES);
        Ok(recharges)
    }
}

/// Spreads incoming payments across the configured VPAs.
pub fn choose_upi_id(upi_ids: &[String]) -> String {
    upi_ids
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| FALLBACK_UPI_ID.to_string())
}

pub fn upi_uri(upi_id: &str, merchant: &str, amount: u64, note_currency: Option<&str>) -> String {
    let mut uri = format!(
        "upi://pay?pa={}&pn={}&am={}&cu=INR",
        upi_id,
        urlencoding::encode(merchant),
        amount
    );
    if let Some(currency) = note_currency {
        uri.push_str("&tn=");
        uri.push_str(&urlencoding::encode(&format!("Recharge {}{}", currency, amount)));
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upi_uris() {
        assert_eq!(
            upi_uri("shop@sbi", "CrickBuzz", 500, None),
            "upi://pay?pa=shop@sbi&pn=CrickBuzz&am=500&cu=INR"
        );
        assert_eq!(
            upi_uri("shop@sbi", "Crick Buzz", 500, Some("₹")),
            "upi://pay?pa=shop@sbi&pn=Crick%20Buzz&am=500&cu=INR&tn=Recharge%20%E2%82%B9500"
        );
    }

    #[test]
    fn upi_choice_falls_back() {
        assert_eq!(choose_upi_id(&[]), FALLBACK_UPI_ID);

        let ids = vec!["a@upi".to_string(), "b@upi".to_string()];
        for _ in 0..20 {
            assert!(ids.contains(&choose_upi_id(&ids)));
        }
    }
}
