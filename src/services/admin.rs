use futures_util::future::try_join3;

use super::ServiceError;
use crate::models::admin::{DashboardStats, LossTracking, RoleFilter};
use crate::models::payment_methods::PaymentMethod;
use crate::models::transactions::{PaymentType, Transaction, TransactionFilter, TransactionStatus};
use crate::models::users::{User, UserUpdate};
use crate::repositories::admin::AdminRepository;
use crate::repositories::payment_methods::PaymentMethodRepository;
use crate::validation::{self, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingKind {
    Payments,
    Withdrawals,
}

impl PendingKind {
    fn payment_type(&self) -> PaymentType {
        match self {
            PendingKind::Payments => PaymentType::Recharge,
            PendingKind::Withdrawals => PaymentType::Withdrawal,
        }
    }
}

#[derive(Clone)]
pub struct AdminService {
    repository: AdminRepository,
    payment_methods: PaymentMethodRepository,
}

impl AdminService {
    pub fn new(repository: AdminRepository, payment_methods: PaymentMethodRepository) -> Self {
        Self {
            repository,
            payment_methods,
        }
    }

    pub async fn dashboard(&self, admin: &User) -> Result<DashboardStats, ServiceError> {
        require_admin(admin)?;

        let processing = TransactionFilter {
            status: Some(TransactionStatus::Processing),
            payment_type: None,
        };
        let everything = TransactionFilter::default();

        let (users, pending, transactions) = try_join3(
            self.repository.users(),
            self.repository.transactions(&processing),
            self.repository.transactions(&everything),
        )
        .await?;

        Ok(DashboardStats {
            total_users: users.len(),
            total_transactions: transactions.len(),
            pending_transactions: pending.len(),
            total_balance: users.iter().map(|u| u.wallet_balance).sum(),
        })
    }

    pub async fn users(&self, admin: &User) -> Result<Vec<User>, ServiceError> {
        require_admin(admin)?;
        Ok(self.repository.users().await?)
    }

    pub async fn pending(
        &self,
        admin: &User,
        kind: PendingKind,
    ) -> Result<Vec<Transaction>, ServiceError> {
        require_admin(admin)?;

        let filter = TransactionFilter {
            status: Some(TransactionStatus::Processing),
            payment_type: Some(kind.payment_type()),
        };
        Ok(self.repository.transactions(&filter).await?)
    }

    pub async fn approve(&self, admin: &User, transaction_id: &str) -> Result<(), ServiceError> {
        self.set_status(admin, transaction_id, TransactionStatus::Completed)
            .await
    }

    pub async fn cancel(&self, admin: &User, transaction_id: &str) -> Result<(), ServiceError> {
        self.set_status(admin, transaction_id, TransactionStatus::Cancelled)
            .await
    }

    async fn set_status(
        &self,
        admin: &User,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> Result<(), ServiceError> {
        require_admin(admin)?;

        self.repository
            .update_transaction_status(transaction_id, &status, &admin.phone)
            .await
            .inspect_err(|e| log::error!("Error updating {}: {}", transaction_id, e))?;
        log::info!("Transaction {} marked {} by {}", transaction_id, status, admin.phone);
        Ok(())
    }

    pub async fn delete_user(&self, admin: &User, user_id: &str) -> Result<(), ServiceError> {
        require_admin(admin)?;

        self.repository.delete_user(user_id, &admin.phone).await?;
        log::warn!("User {} deleted by {}", user_id, admin.phone);
        Ok(())
    }

    pub async fn set_restricted(
        &self,
        admin: &User,
        user_id: &str,
        restricted: bool,
    ) -> Result<(), ServiceError> {
        require_admin(admin)?;

        self.repository
            .restrict_user(user_id, &admin.phone, restricted)
            .await?;
        log::info!(
            "User {} {} by {}",
            user_id,
            if restricted { "restricted" } else { "unrestricted" },
            admin.phone
        );
        Ok(())
    }

    pub async fn update_user(
        &self,
        admin: &User,
        user_id: &str,
        name: &str,
        password: Option<&str>,
    ) -> Result<(), ServiceError> {
        require_admin(admin)?;

        let update = user_update(name, password)?;
        self.repository
            .update_user(user_id, &admin.phone, &update)
            .await?;
        log::info!("User {} updated by {}", user_id, admin.phone);
        Ok(())
    }

    pub async fn user_payment_method(
        &self,
        admin: &User,
        user_id: &str,
    ) -> Result<Option<PaymentMethod>, ServiceError> {
        require_admin(admin)?;
        Ok(self.payment_methods.get_for_admin(user_id).await?)
    }

    pub async fn loss_tracking(&self, admin: &User) -> Result<LossTracking, ServiceError> {
        require_admin(admin)?;
        Ok(self.repository.loss_tracking(&admin.phone).await?)
    }
}

pub(crate) fn require_admin(user: &User) -> Result<(), ServiceError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Trims the name; a blank password leaves the current one in place.
fn user_update(name: &str, password: Option<&str>) -> Result<UserUpdate, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName.into());
    }

    let password = match password.filter(|p| !p.trim().is_empty()) {
        Some(password) => {
            validation::validate_password(password)?;
            Some(password.to_string())
        }
        None => None,
    };

    Ok(UserUpdate {
        name: name.to_string(),
        password,
    })
}

pub fn filter_users<'a>(users: &'a [User], query: &str, role: RoleFilter) -> Vec<&'a User> {
    let query = query.trim().to_lowercase();

    users
        .iter()
        .filter(|user| match role {
            RoleFilter::User => !user.is_admin,
            RoleFilter::Admin => user.is_admin,
            RoleFilter::All => true,
        })
        .filter(|user| {
            query.is_empty()
                || user.name.to_lowercase().contains(&query)
                || user.phone.contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(phone: &str, name: &str, is_admin: bool) -> User {
        User {
            id: None,
            phone: phone.to_string(),
            name: name.to_string(),
            is_admin,
            is_restricted: false,
            wallet_balance: 0.0,
            referral_code: None,
            created_at: None,
        }
    }

    #[test]
    fn filters_by_role_and_query() {
        let users = vec![
            user("9876543210", "Asha Rao", false),
            user("9123456780", "Admin One", true),
            user("9000000001", "Ravi", false),
        ];

        let phones = |found: Vec<&User>| found.iter().map(|u| u.phone.clone()).collect::<Vec<_>>();

        assert_eq!(
            phones(filter_users(&users, "", RoleFilter::User)),
            vec!["9876543210", "9000000001"]
        );
        assert_eq!(
            phones(filter_users(&users, "", RoleFilter::Admin)),
            vec!["9123456780"]
        );
        assert_eq!(
            phones(filter_users(&users, "  ASHA ", RoleFilter::All)),
            vec!["9876543210"]
        );
        assert_eq!(
            phones(filter_users(&users, "9000", RoleFilter::User)),
            vec!["9000000001"]
        );
    }

    #[test]
    fn blank_password_is_omitted() {
        let update = user_update("  Asha  ", Some("   ")).unwrap();
        assert_eq!(update.name, "Asha");
        assert_eq!(update.password, None);

        let update = user_update("Asha", Some("secret1")).unwrap();
        assert_eq!(update.password.as_deref(), Some("secret1"));

        assert!(matches!(
            user_update("Asha", Some("abc")),
            Err(ServiceError::Validation(ValidationError::PasswordTooShort))
        ));
        assert!(matches!(
            user_update("  ", None),
            Err(ServiceError::Validation(ValidationError::MissingName))
        ));
    }

    #[test]
    fn non_admins_are_refused() {
        assert!(matches!(
            require_admin(&user("9876543210", "Asha", false)),
            Err(ServiceError::Forbidden)
        ));
        assert!(require_admin(&user("9123456780", "Admin", true)).is_ok());
    }
}
