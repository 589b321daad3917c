//! Login endpoint: combined email-or-phone identifier, token issuance.

use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use tracing::debug;

use super::{
    error::AuthError,
    state::{AppState, REMEMBER_ME_TTL_SECONDS},
    types::{LoginRequest, LoginResponse},
    LABEL_EMAIL, LABEL_PASSWORD, LABEL_PHONE,
};
use crate::password;
use crate::store::Credentials;
use crate::validation::{phone, valid_email, Validator};

pub const TOKEN_TYPE: &str = "Bearer";

/// Expiry rendering for the login response, `YYYY-MM-DD HH:MM:SS` in UTC.
const EXPIRES_IN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation Error", body = super::types::ValidationErrorResponse),
        (status = 401, description = "Unauthorized", body = super::types::MessageResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    state: Extension<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, AuthError> {
    let request = payload.map_or_else(LoginRequest::default, |Json(payload)| payload);
    let response = handle_login(&state, request).await?;
    Ok(Json(response))
}

/// Classify the identifier, validate, match credentials, issue a token.
///
/// Unknown identifier and wrong password take the same exit so responses
/// cannot be used to enumerate accounts.
pub(super) async fn handle_login(
    state: &AppState,
    request: LoginRequest,
) -> Result<LoginResponse, AuthError> {
    let mut validator = Validator::new();

    // Anything that parses as an email is an email login; everything else
    // goes through the Turkish mobile rule.
    let login_with_email = valid_email(&request.email_phone);
    if login_with_email {
        if validator.required("email", LABEL_EMAIL, &request.email_phone) {
            validator.email("email", LABEL_EMAIL, &request.email_phone);
        }
    } else if validator.required("phone_number", LABEL_PHONE, &request.email_phone) {
        validator.turkish_phone("phone_number", LABEL_PHONE, &request.email_phone);
    }
    validator.required("password", LABEL_PASSWORD, &request.password);

    validator.finish().map_err(AuthError::Validation)?;

    let credentials = if login_with_email {
        state.store.find_by_email(&request.email_phone).await?
    } else {
        let normalized = phone::normalize(&request.email_phone);
        state.store.find_by_phone(&normalized).await?
    };

    let Some(Credentials {
        user,
        password_hash,
    }) = credentials
    else {
        return Err(AuthError::Unauthorized);
    };

    if !password::verify(&request.password, &password_hash)? {
        return Err(AuthError::Unauthorized);
    }

    let ttl_seconds = if request.remember_me.unwrap_or(false) {
        REMEMBER_ME_TTL_SECONDS
    } else {
        state.config.token_ttl_seconds()
    };
    let expires_at = Utc::now() + Duration::seconds(ttl_seconds);

    let issued = state.tokens.issue(user.id, expires_at).await?;

    debug!(user_id = %user.id, "login successful");

    Ok(LoginResponse {
        user: user.into(),
        access_token: issued.access_token,
        token_type: TOKEN_TYPE.to_string(),
        expires_in: issued.expires_at.format(EXPIRES_IN_FORMAT).to_string(),
    })
}
