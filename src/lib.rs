//! # Kimlik (Credential Authentication API)
//!
//! `kimlik` is a small authentication service: user registration, login with
//! email or Turkish mobile number, bearer-token logout, and current-user
//! retrieval.
//!
//! ## Identifiers
//!
//! Users sign in with a single combined identifier field. Anything that parses
//! as an email address is treated as an email login; everything else goes
//! through the Turkish mobile rule and is normalized to the canonical 12-digit
//! international form (`905xxxxxxxxx`) before lookup, so formatting variants of
//! the same number always resolve to the same account.
//!
//! ## Tokens
//!
//! Access tokens are opaque random values; the database only stores a SHA-256
//! hash. A user may hold several valid tokens at once (multi-device). Revoked
//! or expired tokens authenticate nothing. Login failures never distinguish an
//! unknown identifier from a wrong password, to prevent account enumeration.
//!
//! ## Passwords
//!
//! Passwords are Argon2id-hashed at rest and must carry upper/lower case,
//! digit, and symbol classes with a minimum length of eight.

pub mod api;
pub mod cli;
pub mod password;
pub mod store;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
