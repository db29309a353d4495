use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::repositories::{
    admin::AdminRepository,
    api::{ApiClient, ApiError},
    auth::AuthRepository,
    cricket::CricketRepository,
    earnings::EarningsRepository,
    payment_methods::PaymentMethodRepository,
    referral::ReferralRepository,
    session::SessionError,
    wallet::WalletRepository,
};
use crate::settings::Settings;
use crate::validation::ValidationError;

pub mod admin;
pub mod auth;
pub mod earnings;
pub mod matches;
pub mod payment_methods;
pub mod referral;
pub mod session;
pub mod wallet;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Please log in first")]
    NotLoggedIn,
    #[error("Your account has been restricted. Please contact support.")]
    Restricted,
    #[error("Admin access required")]
    Forbidden,
    #[error("Please wait {0} before clicking again.")]
    CoolingDown(String),
    #[error("A request is already in progress")]
    Busy,
    #[error("You will be able to update it on {0}")]
    UpdateLocked(String),
    #[error("Communication error: {0} - {1}")]
    Communication(String, String),
}

impl ServiceError {
    /// True when the server, not the client, refused because of the cooldown.
    pub fn is_server_cooldown(&self) -> bool {
        matches!(self, ServiceError::Api(e) if e.is_cooldown())
    }
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Clone + Send,
{
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            let handler = handler.clone();

            tokio::spawn(async move {
                handler.handle_request(request).await;
            });
        }
    }
}

/// Every backend repository, sharing one HTTP client.
#[derive(Clone)]
pub struct Backend {
    pub admin: AdminRepository,
    pub auth: AuthRepository,
    pub cricket: CricketRepository,
    pub earnings: EarningsRepository,
    pub payment_methods: PaymentMethodRepository,
    pub referral: ReferralRepository,
    pub wallet: WalletRepository,
}

impl Backend {
    pub fn new(api: ApiClient) -> Self {
        Self {
            admin: AdminRepository::new(api.clone()),
            auth: AuthRepository::new(api.clone()),
            cricket: CricketRepository::new(api.clone()),
            earnings: EarningsRepository::new(api.clone()),
            payment_methods: PaymentMethodRepository::new(api.clone()),
            referral: ReferralRepository::new(api.clone()),
            wallet: WalletRepository::new(api),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let api = ApiClient::new(&settings.api.base_url, settings.api.timeout_secs)?;
        Ok(Self::new(api))
    }
}
