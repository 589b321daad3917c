//! Token-authenticated endpoints: logout and current user.

use axum::{extract::Extension, http::HeaderMap, response::IntoResponse, Json};
use tracing::debug;

use super::{
    error::AuthError,
    principal::{require_auth, Principal},
    state::AppState,
    types::{CurrentUserResponse, MessageResponse},
};

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn logout(
    headers: HeaderMap,
    state: Extension<AppState>,
) -> Result<impl IntoResponse, AuthError> {
    let principal = require_auth(&headers, state.tokens.as_ref()).await?;
    let response = handle_logout(&state, principal).await?;
    Ok(Json(response))
}

/// Revoke exactly the presented token. The store treats a second revoke as a
/// no-op, so a race between two logouts of the same token still succeeds.
pub(super) async fn handle_logout(
    state: &AppState,
    principal: Principal,
) -> Result<MessageResponse, AuthError> {
    state.tokens.revoke(&principal.token).await?;
    debug!(user_id = %principal.user.id, "token revoked");
    Ok(MessageResponse {
        message: "Successfully logged out.".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/user",
    responses(
        (status = 200, description = "Authenticated user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn current_user(
    headers: HeaderMap,
    state: Extension<AppState>,
) -> Result<impl IntoResponse, AuthError> {
    let principal = require_auth(&headers, state.tokens.as_ref()).await?;
    Ok(Json(handle_current_user(principal)))
}

/// No state change; echoes the resolved identity.
pub(super) fn handle_current_user(principal: Principal) -> CurrentUserResponse {
    CurrentUserResponse {
        user: principal.user.into(),
        message: "Retrieved successfully".to_string(),
    }
}
