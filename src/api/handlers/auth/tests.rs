//! Auth handler tests against the in-memory store.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};

use super::error::AuthError;
use super::login::{handle_login, TOKEN_TYPE};
use super::principal::require_auth;
use super::register::handle_register;
use super::session::{handle_current_user, handle_logout};
use super::state::{AppState, AuthConfig};
use super::types::{LoginRequest, RegisterRequest};
use crate::store::memory::MemoryStore;

fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), store.clone(), AuthConfig::new());
    (state, store)
}

fn register_request(email: &str, phone: &str) -> RegisterRequest {
    RegisterRequest {
        firstname: "Ayşe".to_string(),
        lastname: "Yılmaz".to_string(),
        email: email.to_string(),
        phone_number: phone.to_string(),
        password: "Abc12345!".to_string(),
    }
}

fn login_request(identifier: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email_phone: identifier.to_string(),
        password: password.to_string(),
        remember_me: None,
    }
}

fn parse_expires_in(expires_in: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(expires_in, "%Y-%m-%d %H:%M:%S")
        .expect("expires_in should be a formatted date-time")
}

#[tokio::test]
async fn register_returns_created_user_with_normalized_phone() {
    let (state, _) = test_state();
    let response = handle_register(&state, register_request("ayse@example.com", "+90 532 123 45 67"))
        .await
        .unwrap();
    assert_eq!(response.message, "Created successfully");
    assert_eq!(response.user.phone_number, "905321234567");
    assert_eq!(response.user.email, "ayse@example.com");
}

#[tokio::test]
async fn register_phone_variants_normalize_to_same_stored_value() {
    let (state, _) = test_state();
    handle_register(&state, register_request("first@example.com", "+90 532 123 45 67"))
        .await
        .unwrap();

    // Same number in bare form: the canonical values collide.
    let err = handle_register(&state, register_request("second@example.com", "905321234567"))
        .await
        .unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(
        errors["phone_number"],
        vec!["Telefon Numarası daha önce alınmış."]
    );
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let (state, _) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    let err = handle_register(&state, register_request("ayse@example.com", "905329999999"))
        .await
        .unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(errors["email"], vec!["Email daha önce alınmış."]);
}

#[tokio::test]
async fn register_collects_all_field_errors_at_once() {
    let (state, _) = test_state();
    let err = handle_register(&state, RegisterRequest::default())
        .await
        .unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    for field in ["firstname", "lastname", "email", "phone_number", "password"] {
        assert!(errors.contains_key(field), "missing errors for {field}");
    }
    assert_eq!(errors["firstname"], vec!["İsim alanı zorunludur."]);
    assert_eq!(errors["password"], vec!["Şifre alanı zorunludur."]);
}

#[tokio::test]
async fn register_enforces_password_strength() {
    let (state, _) = test_state();
    let mut request = register_request("ayse@example.com", "905321234567");
    request.password = "abc12345".to_string();

    let err = handle_register(&state, request).await.unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(errors.contains_key("password"));

    let mut request = register_request("ayse@example.com", "905321234567");
    request.password = "Abc12345!".to_string();
    assert!(handle_register(&state, request).await.is_ok());
}

#[tokio::test]
async fn register_rejects_letters_between_phone_digits() {
    let (state, _) = test_state();
    let err = handle_register(&state, register_request("ayse@example.com", "90x532y123z45w67"))
        .await
        .unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(errors.contains_key("phone_number"));
}

#[tokio::test]
async fn login_with_email_issues_bearer_token() {
    let (state, _) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    let response = handle_login(&state, login_request("ayse@example.com", "Abc12345!"))
        .await
        .unwrap();
    assert_eq!(response.token_type, TOKEN_TYPE);
    assert!(!response.access_token.is_empty());
    assert_eq!(response.user.email, "ayse@example.com");
}

#[tokio::test]
async fn login_with_formatted_phone_finds_canonical_account() {
    let (state, _) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    let response = handle_login(&state, login_request("+90 532 123 45 67", "Abc12345!"))
        .await
        .unwrap();
    assert_eq!(response.user.phone_number, "905321234567");
}

#[tokio::test]
async fn login_default_ttl_applies_without_remember_me() {
    let (state, _) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    let response = handle_login(&state, login_request("ayse@example.com", "Abc12345!"))
        .await
        .unwrap();
    let expires = parse_expires_in(&response.expires_in);
    let delta = expires - Utc::now().naive_utc();
    // default policy: 12 hours
    assert!(delta.num_minutes() > 11 * 60 && delta.num_minutes() <= 12 * 60);
}

#[tokio::test]
async fn login_remember_me_extends_expiry_to_four_weeks() {
    let (state, _) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    let mut request = login_request("ayse@example.com", "Abc12345!");
    request.remember_me = Some(true);
    let response = handle_login(&state, request).await.unwrap();

    let expires = parse_expires_in(&response.expires_in);
    let delta = expires - Utc::now().naive_utc();
    assert!(delta.num_days() >= 27 && delta.num_days() <= 28);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (state, _) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    let wrong_password = handle_login(&state, login_request("ayse@example.com", "Wrong123!"))
        .await
        .unwrap_err();
    let unknown_identifier = handle_login(&state, login_request("nobody@example.com", "Abc12345!"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::Unauthorized));
    assert!(matches!(unknown_identifier, AuthError::Unauthorized));
}

#[tokio::test]
async fn login_validates_identifier_and_password_presence() {
    let (state, _) = test_state();
    let err = handle_login(&state, LoginRequest::default())
        .await
        .unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    // empty identifier classifies as phone login
    assert_eq!(
        errors["phone_number"],
        vec!["Telefon Numarası alanı zorunludur."]
    );
    assert_eq!(errors["password"], vec!["Şifre alanı zorunludur."]);
}

#[tokio::test]
async fn login_rejects_malformed_phone_identifier() {
    let (state, _) = test_state();
    let err = handle_login(&state, login_request("12345", "Abc12345!"))
        .await
        .unwrap_err();
    let AuthError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(errors.contains_key("phone_number"));
}

#[tokio::test]
async fn logout_revokes_only_the_presented_token() {
    let (state, store) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();

    // two concurrent devices
    let first = handle_login(&state, login_request("ayse@example.com", "Abc12345!"))
        .await
        .unwrap();
    let second = handle_login(&state, login_request("ayse@example.com", "Abc12345!"))
        .await
        .unwrap();
    assert_eq!(store.active_token_count(), 2);

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {}", first.access_token).parse().unwrap(),
    );
    let principal = require_auth(&headers, store.as_ref()).await.unwrap();
    let response = handle_logout(&state, principal).await.unwrap();
    assert_eq!(response.message, "Successfully logged out.");
    assert_eq!(store.active_token_count(), 1);

    // the revoked token no longer authenticates
    let err = require_auth(&headers, store.as_ref()).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));

    // the other device's token still does
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {}", second.access_token).parse().unwrap(),
    );
    assert!(require_auth(&headers, store.as_ref()).await.is_ok());
}

#[tokio::test]
async fn current_user_echoes_resolved_identity() {
    let (state, store) = test_state();
    handle_register(&state, register_request("ayse@example.com", "905321234567"))
        .await
        .unwrap();
    let login = handle_login(&state, login_request("ayse@example.com", "Abc12345!"))
        .await
        .unwrap();

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {}", login.access_token).parse().unwrap(),
    );
    let principal = require_auth(&headers, store.as_ref()).await.unwrap();
    let response = handle_current_user(principal);
    assert_eq!(response.message, "Retrieved successfully");
    assert_eq!(response.user, login.user);
}

#[tokio::test]
async fn unknown_token_does_not_authenticate() {
    let (_, store) = test_state();
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        "Bearer not-a-real-token".parse().unwrap(),
    );
    let err = require_auth(&headers, store.as_ref()).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));
}
