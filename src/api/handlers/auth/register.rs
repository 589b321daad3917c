//! Registration endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

use super::{
    error::AuthError,
    state::AppState,
    types::{RegisterRequest, RegisterResponse},
    LABEL_EMAIL, LABEL_FIRSTNAME, LABEL_LASTNAME, LABEL_PASSWORD, LABEL_PHONE,
};
use crate::password;
use crate::store::{CreateUserOutcome, NewUser};
use crate::validation::{phone, Validator};

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Validation Error", body = super::types::ValidationErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    state: Extension<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<impl IntoResponse, AuthError> {
    // Missing payloads still get the full per-field "required" report.
    let request = payload.map_or_else(RegisterRequest::default, |Json(payload)| payload);
    let response = handle_register(&state, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Validate every field together, then persist. Uniqueness is checked during
/// validation so taken identifiers report alongside the other rule failures,
/// and again by the store so a racing insert cannot slip through.
pub(super) async fn handle_register(
    state: &AppState,
    request: RegisterRequest,
) -> Result<RegisterResponse, AuthError> {
    let mut validator = Validator::new();

    validator.required("firstname", LABEL_FIRSTNAME, &request.firstname);
    validator.required("lastname", LABEL_LASTNAME, &request.lastname);

    if validator.required("email", LABEL_EMAIL, &request.email) {
        validator.email("email", LABEL_EMAIL, &request.email);
        if state.store.find_by_email(&request.email).await?.is_some() {
            validator.already_taken("email", LABEL_EMAIL);
        }
    }

    if validator.required("phone_number", LABEL_PHONE, &request.phone_number) {
        validator.turkish_phone("phone_number", LABEL_PHONE, &request.phone_number);
        if phone::is_valid(&request.phone_number) {
            let normalized = phone::normalize(&request.phone_number);
            if state.store.find_by_phone(&normalized).await?.is_some() {
                validator.already_taken("phone_number", LABEL_PHONE);
            }
        }
    }

    if validator.required("password", LABEL_PASSWORD, &request.password) {
        validator.password_strength("password", LABEL_PASSWORD, &request.password);
    }

    validator.finish().map_err(AuthError::Validation)?;

    let new_user = NewUser {
        firstname: request.firstname,
        lastname: request.lastname,
        email: request.email,
        phone_number: phone::normalize(&request.phone_number),
        password_hash: password::hash(&request.password)?,
    };

    match state.store.create_user(new_user).await? {
        CreateUserOutcome::Created(user) => {
            debug!(user_id = %user.id, "user registered");
            Ok(RegisterResponse {
                user: user.into(),
                message: "Created successfully".to_string(),
            })
        }
        CreateUserOutcome::Conflict(field) => Err(AuthError::Conflict(field)),
    }
}
