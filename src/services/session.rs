use std::fmt;
use std::str::FromStr;

use super::wallet::PaymentRequest;
use super::ServiceError;
use crate::models::users::User;
use crate::repositories::api::ApiError;
use crate::repositories::session::SessionStore;
use crate::repositories::wallet::WalletRepository;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Account,
    Home,
    Matches,
    Earnings,
    Recharge,
    Withdrawal,
    Payment,
    PaymentMethods,
    MyOrders,
    ReferAndEarn,
    AdminDashboard,
    AdminWithdrawals,
    AdminPayments,
    AdminUsers,
    AdminReferralSettings,
    AdminLossTracking,
}

impl Tab {
    pub const ALL: [Tab; 16] = [
        Tab::Account,
        Tab::Home,
        Tab::Matches,
        Tab::Earnings,
        Tab::Recharge,
        Tab::Withdrawal,
        Tab::Payment,
        Tab::PaymentMethods,
        Tab::MyOrders,
        Tab::ReferAndEarn,
        Tab::AdminDashboard,
        Tab::AdminWithdrawals,
        Tab::AdminPayments,
        Tab::AdminUsers,
        Tab::AdminReferralSettings,
        Tab::AdminLossTracking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Account => "account",
            Tab::Home => "home",
            Tab::Matches => "matches",
            Tab::Earnings => "earnings",
            Tab::Recharge => "recharge",
            Tab::Withdrawal => "withdrawal",
            Tab::Payment => "payment",
            Tab::PaymentMethods => "payment-methods",
            Tab::MyOrders => "my-orders",
            Tab::ReferAndEarn => "refer-and-earn",
            Tab::AdminDashboard => "admin-dashboard",
            Tab::AdminWithdrawals => "admin-withdrawals",
            Tab::AdminPayments => "admin-payments",
            Tab::AdminUsers => "admin-users",
            Tab::AdminReferralSettings => "admin-referral-settings",
            Tab::AdminLossTracking => "admin-loss-tracking",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Tab::AdminDashboard
                | Tab::AdminWithdrawals
                | Tab::AdminPayments
                | Tab::AdminUsers
                | Tab::AdminReferralSettings
                | Tab::AdminLossTracking
        )
    }

    /// Everything except the login page needs a session.
    pub fn is_protected(&self) -> bool {
        *self != Tab::Account
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .iter()
            .find(|tab| tab.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown tab '{}'", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Fixed lock screen; logout is the only action.
    Restricted,
    Page(Tab),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Anonymous,
    Active,
    /// A restricted blob was found and removed.
    Restricted,
}

/// Client-side session and tab routing.
pub struct AppSession {
    store: SessionStore,
    user: Option<User>,
    wallet_balance: f64,
    active_tab: Tab,
    pending_payment: Option<PaymentRequest>,
}

impl AppSession {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            user: None,
            wallet_balance: 0.0,
            active_tab: Tab::Account,
            pending_payment: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn wallet_balance(&self) -> f64 {
        self.wallet_balance
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn pending_payment(&self) -> Option<&PaymentRequest> {
        self.pending_payment.as_ref()
    }

    pub fn require_user(&self) -> Result<&User, ServiceError> {
        match &self.user {
            Some(user) if user.is_locked() => Err(ServiceError::Restricted),
            Some(user) => Ok(user),
            None => Err(ServiceError::NotLoggedIn),
        }
    }

    pub fn require_admin(&self) -> Result<&User, ServiceError> {
        let user = self.require_user()?;
        if !user.is_admin {
            return Err(ServiceError::Forbidden);
        }
        Ok(user)
    }

    pub fn restore(&mut self) -> Result<SessionState, ServiceError> {
        let user = match self.store.load() {
            Ok(user) => user,
            Err(e) => {
                log::error!("Error loading saved user: {}", e);
                if let Err(e) = self.store.clear() {
                    log::error!("Error clearing saved user: {}", e);
                }
                None
            }
        };

        let Some(user) = user else {
            self.active_tab = Tab::Account;
            return Ok(SessionState::Anonymous);
        };

        if user.is_locked() {
            log::warn!("Saved session for {} is restricted, clearing it", user.phone);
            self.store.clear()?;
            self.active_tab = Tab::Account;
            return Ok(SessionState::Restricted);
        }

        self.wallet_balance = user.wallet_balance;
        self.active_tab = default_tab(&user);
        self.user = Some(user);
        Ok(SessionState::Active)
    }

    /// Persists the session and routes to the role's landing tab.
    pub fn login(&mut self, user: User) -> Result<Tab, ServiceError> {
        if user.is_locked() {
            self.active_tab = Tab::Account;
            return Err(ServiceError::Restricted);
        }

        self.store.save(&user)?;
        self.wallet_balance = user.wallet_balance;
        self.active_tab = default_tab(&user);
        self.user = Some(user);
        Ok(self.active_tab)
    }

    pub fn logout(&mut self) -> Result<(), ServiceError> {
        self.user = None;
        self.wallet_balance = 0.0;
        self.pending_payment = None;
        self.active_tab = Tab::Account;
        self.store.clear()?;
        log::info!("Logged out");
        Ok(())
    }

    /// Replaces the cached user with a fresher copy from the backend. A
    /// restriction drops the stored blob but keeps the lock screen up until
    /// logout.
    pub fn refresh_user(&mut self, user: User) -> Result<(), ServiceError> {
        if user.is_locked() {
            self.store.clear()?;
        } else {
            self.store.save(&user)?;
        }
        self.user = Some(user);
        Ok(())
    }

    pub fn navigate(&mut self, requested: Tab) -> Tab {
        self.active_tab = match &self.user {
            None if requested.is_protected() => Tab::Account,
            None => requested,
            Some(user) if user.is_admin => {
                if requested.is_admin() {
                    requested
                } else {
                    Tab::AdminDashboard
                }
            }
            Some(_) if requested.is_admin() => Tab::Home,
            Some(_) if requested == Tab::Payment && self.pending_payment.is_none() => Tab::Recharge,
            Some(_) => requested,
        };
        self.active_tab
    }

    /// Unknown names fall back to the landing page for the current role.
    pub fn navigate_named(&mut self, name: &str) -> Tab {
        match name.parse::<Tab>() {
            Ok(tab) => self.navigate(tab),
            Err(_) => {
                let fallback = self.user.as_ref().map(default_tab).unwrap_or(Tab::Account);
                self.navigate(fallback)
            }
        }
    }

    pub fn view(&self) -> View {
        match &self.user {
            Some(user) if user.is_locked() => View::Restricted,
            _ => View::Page(self.active_tab),
        }
    }

    pub fn begin_payment(&mut self, payment: PaymentRequest) -> Tab {
        self.pending_payment = Some(payment);
        self.navigate(Tab::Payment)
    }

    /// The recharge stays visible under My Orders; only the view is closed.
    pub fn close_payment(&mut self) -> Tab {
        self.pending_payment = None;
        self.navigate(Tab::Recharge)
    }

    /// Admins have no wallet, so nothing is fetched for them.
    pub async fn refresh_balance(&mut self, wallet: &WalletRepository) -> Result<f64, ServiceError> {
        let Some(user) = self.user.clone() else {
            return Err(ServiceError::NotLoggedIn);
        };
        if user.is_admin {
            return Ok(self.wallet_balance);
        }

        match wallet.balance(&user.phone).await {
            Ok(balance) => {
                self.wallet_balance = balance;
                let mut updated = user;
                updated.wallet_balance = balance;
                self.refresh_user(updated)?;
                Ok(balance)
            }
            Err(ApiError::Rejected { status: 403, .. }) => {
                let mut updated = user;
                updated.is_restricted = true;
                self.refresh_user(updated)?;
                Err(ServiceError::Restricted)
            }
            Err(e) => {
                log::error!("Error fetching wallet balance: {}", e);
                Err(e.into())
            }
        }
    }
}

fn default_tab(user: &User) -> Tab {
    if user.is_admin {
        Tab::AdminDashboard
    } else {
        Tab::Home
    }
}
