//! Boundary error type for auth endpoints.
//!
//! Everything a handler can fail with is translated to structured JSON here;
//! nothing propagates as a panic. Credential mismatches are deliberately
//! uniform so callers cannot probe which identifiers exist.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use super::{field_label, field_name};
use crate::store::UniqueField;
use crate::validation::{FieldErrors, Validator};

#[derive(Debug)]
pub enum AuthError {
    /// One or more field rules failed; carries field -> messages.
    Validation(FieldErrors),
    /// Unknown identifier or wrong password, indistinguishable by design.
    Unauthorized,
    /// A uniqueness constraint rejected the write (register race).
    Conflict(UniqueField),
    /// Collaborator failure; logged, reported opaquely.
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => validation_response(errors),
            Self::Conflict(field) => {
                // Same shape as a failed rule pass, on the conflicting field.
                let mut validator = Validator::new();
                validator.already_taken(field_name(field), field_label(field));
                let errors = validator.finish().err().unwrap_or_default();
                validation_response(errors)
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized." })),
            )
                .into_response(),
            Self::Internal(err) => {
                error!("auth handler failure: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

fn validation_response(errors: FieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": errors,
            "message": "Validation Error",
        })),
    )
        .into_response()
}
