//! Shared application state and token expiry configuration.

use std::sync::Arc;

use crate::store::{CredentialStore, TokenService};

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 12 * 60 * 60;

/// Remember-me logins are pinned to four weeks from issuance.
pub const REMEMBER_ME_TTL_SECONDS: i64 = 4 * 7 * 24 * 60 * 60;

#[derive(Clone, Copy, Debug)]
pub struct AuthConfig {
    token_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    /// Expiry window for logins without `remember_me`.
    #[must_use]
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Collaborators injected into every handler; trait objects so tests can
/// swap in the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: Arc<dyn TokenService>,
    pub config: AuthConfig,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: Arc<dyn TokenService>,
        config: AuthConfig,
    ) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }
}
