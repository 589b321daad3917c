//! Request/response types for auth endpoints.
//!
//! Request fields default to empty strings so that missing JSON keys flow
//! through the validation engine (collecting localized "required" messages)
//! instead of dying in deserialization.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::User;
use crate::validation::FieldErrors;

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct LoginRequest {
    /// Combined identifier: an email address or a Turkish mobile number.
    #[serde(default)]
    pub email_phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember_me: Option<bool>,
}

/// User representation returned by the API; never carries the password hash.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserBody {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            phone_number: user.phone_number,
            created_at: user
                .created_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub user: UserBody,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub user: UserBody,
    pub access_token: String,
    pub token_type: String,
    /// Token expiry rendered as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub expires_in: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CurrentUserResponse {
    pub user: UserBody,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ValidationErrorResponse {
    pub error: FieldErrors,
    pub message: String,
}
