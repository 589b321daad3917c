//! Persistence seams for users and bearer tokens.
//!
//! Handlers only see the [`CredentialStore`] and [`TokenService`] traits, so
//! the Postgres implementation can be swapped for the in-memory fake in
//! tests. Raw token values never reach a store; both implementations receive
//! the SHA-256 of the presented token.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub mod postgres;

#[cfg(test)]
pub mod memory;

/// Identity record as stored; the password hash travels separately in
/// [`Credentials`] so it cannot leak through user serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash, for credential checks.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// Insert payload for registration. `phone_number` must already be in the
/// canonical 12-digit form and `password_hash` a PHC string.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
}

/// Column whose uniqueness constraint rejected a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    PhoneNumber,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub enum CreateUserOutcome {
    Created(User),
    Conflict(UniqueField),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user; a uniqueness violation is an outcome, not an error.
    async fn create_user(&self, new_user: NewUser) -> Result<CreateUserOutcome>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>>;

    /// Lookup by canonical phone number.
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Credentials>>;
}

/// A freshly issued token: the raw value goes to the client once, the expiry
/// into the login response.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a new opaque token for the user, valid until `expires_at`.
    async fn issue(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<IssuedToken>;

    /// Resolve a presented raw token to its user. Revoked, expired, and
    /// unknown tokens all come back as `None`.
    async fn resolve(&self, token: &str) -> Result<Option<User>>;

    /// Revoke a presented raw token. Revoking an already-revoked or unknown
    /// token is a no-op.
    async fn revoke(&self, token: &str) -> Result<()>;
}

/// Generate a new opaque bearer token.
/// The raw value is only returned to the client; stores keep a hash.
pub(crate) fn generate_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate access token")?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Hash a token so raw values never touch a store.
pub(crate) fn hash_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}
