mod common;

use axum::{extract::Path, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::tempdir;

use common::{user, MockBackend};
use crickbuzz::models::payment_methods::{PaymentMethod, UpdateWindow};
use crickbuzz::models::referrals::ReferralCheck;
use crickbuzz::repositories::session::SessionStore;
use crickbuzz::services::auth::{AuthService, Registration};
use crickbuzz::services::payment_methods::PaymentMethodService;
use crickbuzz::services::referral::ReferralService;
use crickbuzz::services::session::{AppSession, SessionState, Tab};
use crickbuzz::services::ServiceError;
use crickbuzz::validation::ValidationError;

fn router() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                match (body["phone"].as_str(), body["password"].as_str()) {
                    (Some("9876543210"), Some("secret1")) => Json(json!({
                        "success": true,
                        "data": { "_id": "u1", "phone": "9876543210", "name": "Asha", "walletBalance": 250 }
                    })),
                    (Some("9000000001"), _) => Json(json!({
                        "success": true,
                        "data": { "phone": "9000000001", "name": "Ravi", "isRestricted": true }
                    })),
                    _ => Json(json!({ "success": false, "message": "Invalid credentials" })),
                }
            }),
        )
        .route(
            "/api/auth/register",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "data": { "phone": body["phone"], "name": body["name"], "referralCode": body["referralCode"] }
                }))
            }),
        )
        .route(
            "/api/referral/verify/{code}",
            get(|Path(code): Path<String>| async move {
                match code.as_str() {
                    "ASHA01" => (
                        StatusCode::OK,
                        Json(json!({ "success": true, "valid": true, "data": { "referrerName": "Asha" } })),
                    ),
                    "ZZZZ99" => (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "success": false, "message": "Referral code not found" })),
                    ),
                    _ => (StatusCode::OK, Json(json!({ "success": true, "valid": false }))),
                }
            }),
        )
        .route(
            "/api/referral/link/{id}",
            get(|| async {
                Json(json!({ "success": true, "data": { "referralCode": "ASHA01", "isActive": false } }))
            }),
        )
        .route(
            "/api/payment-methods/{id}",
            get(|| async {
                let last = (Utc::now() - Duration::days(2)).to_rfc3339();
                Json(json!({
                    "success": true,
                    "data": {
                        "accountHolderName": "Asha Rao",
                        "accountNumber": "1234567890",
                        "ifscCode": "SBIN0000001",
                        "lastUpdatedAt": last
                    }
                }))
            }),
        )
}

#[tokio::test]
async fn login_persists_and_restores_the_session() {
    let mock = MockBackend::start(router()).await;
    let auth = AuthService::new(mock.backend().auth);
    let dir = tempdir().unwrap();
    let path = dir.path().join("user.json");

    let mut session = AppSession::new(SessionStore::new(&path));
    let user = auth.login(" 9876543210 ", "secret1").await.unwrap();
    assert_eq!(session.login(user).unwrap(), Tab::Home);
    assert_eq!(session.wallet_balance(), 250.0);

    let mut restored = AppSession::new(SessionStore::new(&path));
    assert_eq!(restored.restore().unwrap(), SessionState::Active);
    assert_eq!(restored.user().map(|u| u.phone.as_str()), Some("9876543210"));
    assert_eq!(restored.navigate(Tab::AdminUsers), Tab::Home);
}

#[tokio::test]
async fn bad_credentials_and_restricted_accounts_are_refused() {
    let mock = MockBackend::start(router()).await;
    let auth = AuthService::new(mock.backend().auth);
    let dir = tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("user.json"));
    let mut session = AppSession::new(store.clone());

    let err = auth.login("9876543210", "wrong-pass").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");

    let err = auth.login("12345", "secret1").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidPhone)));

    let restricted = auth.login("9000000001", "whatever").await.unwrap();
    assert!(matches!(session.login(restricted), Err(ServiceError::Restricted)));
    assert!(store.load().unwrap().is_none());
    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn registration_drops_a_blank_referral_code() {
    let mock = MockBackend::start(router()).await;
    let auth = AuthService::new(mock.backend().auth);

    let registration = |accepted_terms| Registration {
        phone: "9876543210",
        name: " Asha ",
        password: "secret1",
        referral_code: Some("   "),
        accepted_terms,
    };

    let err = auth.register(registration(false)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::TermsNotAccepted)));

    let user = auth.register(registration(true)).await.unwrap();
    assert_eq!(user.name, "Asha");
    assert_eq!(user.referral_code, None);
}

#[tokio::test]
async fn registration_upper_cases_the_referral_code() {
    let mock = MockBackend::start(router()).await;
    let auth = AuthService::new(mock.backend().auth);

    let user = auth
        .register(Registration {
            phone: "9876543210",
            name: "Ravi",
            password: "secret1",
            referral_code: Some(" asha01 "),
            accepted_terms: true,
        })
        .await
        .unwrap();
    assert_eq!(user.referral_code.as_deref(), Some("ASHA01"));
}

#[tokio::test]
async fn referral_codes_are_checked_once_complete() {
    let mock = MockBackend::start(router()).await;
    let referrals = ReferralService::new(mock.backend().referral);

    assert_eq!(referrals.verify("ASH").await.unwrap(), ReferralCheck::NotReady);
    assert_eq!(mock.hits(), 0);

    let asha = ReferralCheck::Valid {
        referrer_name: Some("Asha".to_string()),
    };
    assert_eq!(referrals.verify("ASHA01").await.unwrap(), asha);
    assert_eq!(referrals.verify(" asha01 ").await.unwrap(), asha);
    assert_eq!(referrals.verify("ASHA02").await.unwrap(), ReferralCheck::Invalid);
    assert_eq!(referrals.verify("ZZZZ99").await.unwrap(), ReferralCheck::Invalid);

    assert!(referrals.link(&user("9876543210")).await.unwrap().is_none());
}

#[tokio::test]
async fn payment_method_updates_wait_for_the_window() {
    let mock = MockBackend::start(router()).await;
    let service = PaymentMethodService::new(mock.backend().payment_methods);
    let asha = user("9876543210");

    let saved = service.load(&asha).await.unwrap().unwrap();
    assert_eq!(saved.payment_method.account_holder_name, "Asha Rao");
    let UpdateWindow::Closed { next_update } = saved.window else {
        panic!("window should be closed two days after an update");
    };
    assert!(next_update > Utc::now() + Duration::days(4));

    let incomplete = PaymentMethod {
        account_number: String::new(),
        ..saved.payment_method.clone()
    };
    let hits = mock.hits();
    assert!(matches!(
        service.save(&asha, &incomplete).await,
        Err(ServiceError::Validation(ValidationError::IncompletePaymentMethod))
    ));
    assert_eq!(mock.hits(), hits);

    let err = service.save(&asha, &saved.payment_method).await.unwrap_err();
    assert!(matches!(err, ServiceError::UpdateLocked(_)));
    assert!(err.to_string().starts_with("You will be able to update it on "));
    assert_eq!(mock.hits(), hits + 1);
}

#[tokio::test]
async fn payout_details_are_sent_normalized() {
    let router = Router::new().route(
        "/api/payment-methods/{id}",
        get(|| async { Json(json!({ "success": true, "data": null })) })
            .post(|Json(body): Json<Value>| async move { Json(json!({ "success": true, "data": body })) }),
    );
    let mock = MockBackend::start(router).await;
    let service = PaymentMethodService::new(mock.backend().payment_methods);

    let typed = PaymentMethod {
        account_holder_name: " Asha Rao ".to_string(),
        account_number: "0012 3456".to_string(),
        ifsc_code: "sbin 0000001".to_string(),
        bank_name: String::new(),
        upi_id: "Asha@SBI ".to_string(),
        last_updated_at: None,
    };

    let saved = service.save(&user("9876543210"), &typed).await.unwrap();
    assert_eq!(saved.account_holder_name, "Asha Rao");
    assert_eq!(saved.account_number, "00123456");
    assert_eq!(saved.ifsc_code, "SBIN0000001");
    assert_eq!(saved.upi_id, "asha@sbi");
    assert_eq!(mock.hits(), 2);
}
