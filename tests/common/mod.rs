#![allow(dead_code)]

use axum::{extract::Request, middleware, middleware::Next, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crickbuzz::models::users::User;
use crickbuzz::repositories::api::ApiClient;
use crickbuzz::services::Backend;
use crickbuzz::settings;

/// An in-process stand-in for the REST backend.
pub struct MockBackend {
    pub api: ApiClient,
    hits: Arc<AtomicUsize>,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = router.layer(middleware::from_fn(move |request: Request, next: Next| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                next.run(request).await
            }
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let api = ApiClient::new(&format!("http://{}/api/", addr), 5).unwrap();
        Self { api, hits, server }
    }

    pub fn backend(&self) -> Backend {
        Backend::new(self.api.clone())
    }

    /// Requests that reached the server so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn user(phone: &str) -> User {
    User {
        id: Some(format!("id-{}", phone)),
        phone: phone.to_string(),
        name: "Asha Rao".to_string(),
        is_admin: false,
        is_restricted: false,
        wallet_balance: 0.0,
        referral_code: Some("ASHA01".to_string()),
        created_at: None,
    }
}

pub fn admin() -> User {
    User {
        id: Some("admin1".to_string()),
        is_admin: true,
        name: "Admin".to_string(),
        ..user("9123456780")
    }
}

pub fn app() -> settings::App {
    settings::App {
        name: "CrickBuzz".to_string(),
        currency: "₹".to_string(),
        merchant_name: "CrickBuzz".to_string(),
        upi_ids: vec!["one@sbi".to_string(), "two@ybl".to_string()],
    }
}
