use chrono::{DateTime, Utc};

use super::ServiceError;
use crate::models::payment_methods::{PaymentMethod, UpdateWindow};
use crate::models::users::User;
use crate::repositories::api::ApiError;
use crate::repositories::payment_methods::PaymentMethodRepository;
use crate::validation;

#[derive(Clone, Debug, PartialEq)]
pub struct SavedPaymentMethod {
    pub payment_method: PaymentMethod,
    pub window: UpdateWindow,
}

#[derive(Clone)]
pub struct PaymentMethodService {
    repository: PaymentMethodRepository,
}

impl PaymentMethodService {
    pub fn new(repository: PaymentMethodRepository) -> Self {
        Self { repository }
    }

    pub async fn load(&self, user: &User) -> Result<Option<SavedPaymentMethod>, ServiceError> {
        let now = Utc::now();
        let saved = self.repository.get(&user.phone).await?;

        Ok(saved.map(|payment_method| SavedPaymentMethod {
            window: UpdateWindow::at(payment_method.last_updated_at, now),
            payment_method,
        }))
    }

    pub async fn save(
        &self,
        user: &User,
        payment_method: &PaymentMethod,
    ) -> Result<PaymentMethod, ServiceError> {
        let payment_method = payment_method.normalized();
        validation::validate_payment_method(&payment_method)?;

        let current = self.repository.get(&user.phone).await?;
        self.save_at(user, &payment_method, current.as_ref(), Utc::now())
            .await
    }

    /// Normalizes and validates locally, then refuses early while the weekly
    /// window is closed. The backend enforces the same window and its answer
    /// is surfaced as-is.
    pub async fn save_at(
        &self,
        user: &User,
        payment_method: &PaymentMethod,
        current: Option<&PaymentMethod>,
        now: DateTime<Utc>,
    ) -> Result<PaymentMethod, ServiceError> {
        let payment_method = &payment_method.normalized();
        validation::validate_payment_method(payment_method)?;

        if let UpdateWindow::Closed { next_update } =
            UpdateWindow::at(current.and_then(|pm| pm.last_updated_at), now)
        {
            return Err(ServiceError::UpdateLocked(format_day(next_update)));
        }

        match self.repository.save(&user.phone, payment_method).await {
            Ok(saved) => {
                log::info!("Payment method updated for {}", user.phone);
                Ok(saved)
            }
            Err(ApiError::Rejected {
                next_update_date: Some(date),
                ..
            }) => Err(ServiceError::UpdateLocked(format_server_day(&date))),
            Err(e) => Err(e.into()),
        }
    }
}

/// `d/m/yyyy`, no padding.
pub fn format_day(date: DateTime<Utc>) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

fn format_server_day(date: &str) -> String {
    DateTime::parse_from_rfc3339(date)
        .map(|d| format_day(d.with_timezone(&Utc)))
        .unwrap_or_else(|_| date.to_string())
}
