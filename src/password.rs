//! Argon2id password hashing.
//!
//! The stored value is a PHC-format string carrying algorithm, salt, and
//! parameters; plaintext never reaches the database.

use anyhow::{Context, Result};
use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Returns an error if hashing fails (parameter or RNG failure).
pub fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// A malformed stored hash is an error; a mismatching password is `Ok(false)`.
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed.
pub fn verify(plaintext: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow::anyhow!("invalid stored password hash: {e}"))
        .context("password hash parse")?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}
