//! Bearer token extraction and resolution.
//!
//! Logout and current-user require an already-authenticated identity; this
//! is where the presented token becomes one. The raw token is kept on the
//! principal so logout can revoke exactly the token it arrived with.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::error::AuthError;
use crate::store::{TokenService, User};

/// Authenticated caller context derived from the Authorization header.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user: User,
    pub token: String,
}

/// Resolve the bearer token into a principal, or fail with 401.
///
/// # Errors
/// `AuthError::Unauthorized` when the header is missing or the token is
/// unknown, expired, or revoked; `AuthError::Internal` on store failure.
pub async fn require_auth(
    headers: &HeaderMap,
    tokens: &dyn TokenService,
) -> Result<Principal, AuthError> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(AuthError::Unauthorized);
    };
    match tokens.resolve(&token).await? {
        Some(user) => Ok(Principal { user, token }),
        None => Err(AuthError::Unauthorized),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
