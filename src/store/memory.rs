//! In-memory store fake for handler tests.
//!
//! Mirrors the Postgres implementation's observable behavior: uniqueness on
//! email and phone, hashed token storage, and revoked/expired tokens
//! resolving to nothing.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

use super::{
    generate_token, hash_token, CreateUserOutcome, CredentialStore, Credentials, IssuedToken,
    NewUser, TokenService, UniqueField, User,
};

#[derive(Debug)]
struct StoredToken {
    token_hash: Vec<u8>,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<Credentials>>,
    tokens: Mutex<Vec<StoredToken>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently resolvable tokens, for test assertions.
    pub fn active_token_count(&self) -> usize {
        let now = Utc::now();
        self.tokens
            .lock()
            .expect("tokens lock")
            .iter()
            .filter(|token| token.revoked_at.is_none() && token.expires_at > now)
            .count()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<CreateUserOutcome> {
        let mut users = self.users.lock().expect("users lock");
        if users.iter().any(|c| c.user.email == new_user.email) {
            return Ok(CreateUserOutcome::Conflict(UniqueField::Email));
        }
        if users.iter().any(|c| c.user.phone_number == new_user.phone_number) {
            return Ok(CreateUserOutcome::Conflict(UniqueField::PhoneNumber));
        }
        let user = User {
            id: Uuid::new_v4(),
            firstname: new_user.firstname,
            lastname: new_user.lastname,
            email: new_user.email,
            phone_number: new_user.phone_number,
            created_at: Utc::now(),
        };
        users.push(Credentials {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(CreateUserOutcome::Created(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>> {
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|c| c.user.email == email).cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Credentials>> {
        let users = self.users.lock().expect("users lock");
        Ok(users
            .iter()
            .find(|c| c.user.phone_number == phone_number)
            .cloned())
    }
}

#[async_trait]
impl TokenService for MemoryStore {
    async fn issue(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<IssuedToken> {
        let token = generate_token()?;
        self.tokens.lock().expect("tokens lock").push(StoredToken {
            token_hash: hash_token(&token),
            user_id,
            expires_at,
            revoked_at: None,
        });
        Ok(IssuedToken {
            access_token: token,
            expires_at,
        })
    }

    async fn resolve(&self, token: &str) -> Result<Option<User>> {
        let token_hash = hash_token(token);
        let now = Utc::now();
        let user_id = {
            let tokens = self.tokens.lock().expect("tokens lock");
            tokens
                .iter()
                .find(|t| {
                    t.token_hash == token_hash && t.revoked_at.is_none() && t.expires_at > now
                })
                .map(|t| t.user_id)
        };
        let Some(user_id) = user_id else {
            return Ok(None);
        };
        let users = self.users.lock().expect("users lock");
        Ok(users
            .iter()
            .find(|c| c.user.id == user_id)
            .map(|c| c.user.clone()))
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        let token_hash = hash_token(token);
        let mut tokens = self.tokens.lock().expect("tokens lock");
        if let Some(stored) = tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            stored.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_user(email: &str, phone: &str) -> NewUser {
        NewUser {
            firstname: "Ayşe".to_string(),
            lastname: "Yılmaz".to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_enforces_uniqueness() {
        let store = MemoryStore::new();
        let outcome = store
            .create_user(new_user("a@example.com", "905321234567"))
            .await
            .unwrap();
        assert!(matches!(outcome, CreateUserOutcome::Created(_)));

        let outcome = store
            .create_user(new_user("a@example.com", "905329999999"))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            CreateUserOutcome::Conflict(UniqueField::Email)
        ));

        let outcome = store
            .create_user(new_user("b@example.com", "905321234567"))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            CreateUserOutcome::Conflict(UniqueField::PhoneNumber)
        ));
    }

    #[tokio::test]
    async fn tokens_resolve_until_revoked() {
        let store = MemoryStore::new();
        let CreateUserOutcome::Created(user) = store
            .create_user(new_user("a@example.com", "905321234567"))
            .await
            .unwrap()
        else {
            panic!("expected user to be created");
        };

        let issued = store
            .issue(user.id, Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        let resolved = store.resolve(&issued.access_token).await.unwrap();
        assert_eq!(resolved.as_ref().map(|u| u.id), Some(user.id));

        store.revoke(&issued.access_token).await.unwrap();
        assert!(store.resolve(&issued.access_token).await.unwrap().is_none());

        // revoking again is a no-op
        store.revoke(&issued.access_token).await.unwrap();
    }

    #[tokio::test]
    async fn expired_tokens_do_not_resolve() {
        let store = MemoryStore::new();
        let CreateUserOutcome::Created(user) = store
            .create_user(new_user("a@example.com", "905321234567"))
            .await
            .unwrap()
        else {
            panic!("expected user to be created");
        };

        let issued = store
            .issue(user.id, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        assert!(store.resolve(&issued.access_token).await.unwrap().is_none());
    }
}
