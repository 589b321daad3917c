//! sqlx-backed implementations of the store traits.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::{
    generate_token, hash_token, CreateUserOutcome, CredentialStore, Credentials, IssuedToken,
    NewUser, TokenService, UniqueField, User,
};

/// Store backed by the shared connection pool. Uniqueness and isolation are
/// the database's responsibility; racing writes fail with SQLSTATE 23505.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresStore {
    async fn create_user(&self, new_user: NewUser) -> Result<CreateUserOutcome> {
        let query = r"
            INSERT INTO users
                (firstname, lastname, email, phone_number, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&new_user.firstname)
            .bind(&new_user.lastname)
            .bind(&new_user.email)
            .bind(&new_user.phone_number)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match row {
            Ok(row) => Ok(CreateUserOutcome::Created(User {
                id: row.get("id"),
                created_at: row.get("created_at"),
                firstname: new_user.firstname,
                lastname: new_user.lastname,
                email: new_user.email,
                phone_number: new_user.phone_number,
            })),
            Err(err) => match unique_violation_field(&err) {
                Some(field) => Ok(CreateUserOutcome::Conflict(field)),
                None => Err(err).context("failed to insert user"),
            },
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>> {
        fetch_credentials(&self.pool, "email", email).await
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Credentials>> {
        fetch_credentials(&self.pool, "phone_number", phone_number).await
    }
}

#[async_trait]
impl TokenService for PostgresStore {
    async fn issue(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<IssuedToken> {
        let query = r"
            INSERT INTO access_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );

        for _ in 0..3 {
            let token = generate_token()?;
            let token_hash = hash_token(&token);
            let result = sqlx::query(query)
                .bind(user_id)
                .bind(&token_hash)
                .bind(expires_at)
                .execute(&self.pool)
                .instrument(span.clone())
                .await;

            match result {
                Ok(_) => {
                    return Ok(IssuedToken {
                        access_token: token,
                        expires_at,
                    })
                }
                Err(err) if unique_violation_field(&err).is_some() => {}
                Err(err) => return Err(err).context("failed to insert access token"),
            }
        }

        Err(anyhow!("failed to generate unique access token"))
    }

    async fn resolve(&self, token: &str) -> Result<Option<User>> {
        let token_hash = hash_token(token);
        // Revoked and expired tokens authenticate nothing.
        let query = r"
            SELECT
                users.id, users.firstname, users.lastname, users.email,
                users.phone_number, users.created_at
            FROM access_tokens
            JOIN users ON users.id = access_tokens.user_id
            WHERE access_tokens.token_hash = $1
              AND access_tokens.revoked_at IS NULL
              AND access_tokens.expires_at > NOW()
            LIMIT 1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&token_hash)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to resolve access token")?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            firstname: row.get("firstname"),
            lastname: row.get("lastname"),
            email: row.get("email"),
            phone_number: row.get("phone_number"),
            created_at: row.get("created_at"),
        }))
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        let token_hash = hash_token(token);
        // Revocation is idempotent; it's fine if no rows are updated.
        let query = r"
            UPDATE access_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1
              AND revoked_at IS NULL
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(&token_hash)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to revoke access token")?;
        Ok(())
    }
}

async fn fetch_credentials(
    pool: &PgPool,
    column: &'static str,
    value: &str,
) -> Result<Option<Credentials>> {
    // Column names come from the two fixed call sites, never from input.
    let query = format!(
        r"
        SELECT id, firstname, lastname, email, phone_number, password_hash, created_at
        FROM users
        WHERE {column} = $1
        LIMIT 1
        "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(value)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .with_context(|| format!("failed to lookup user by {column}"))?;

    Ok(row.map(|row| Credentials {
        user: User {
            id: row.get("id"),
            firstname: row.get("firstname"),
            lastname: row.get("lastname"),
            email: row.get("email"),
            phone_number: row.get("phone_number"),
            created_at: row.get("created_at"),
        },
        password_hash: row.get("password_hash"),
    }))
}

fn unique_violation_field(err: &sqlx::Error) -> Option<UniqueField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.code().is_some_and(|code| code.as_ref() == "23505") {
        return None;
    }
    // Map the violated constraint back to the request field.
    match db_err.constraint() {
        Some(name) if name.contains("phone") => Some(UniqueField::PhoneNumber),
        // Unnamed driver constraints still count as a conflict; email is the
        // first unique key in schema order.
        _ => Some(UniqueField::Email),
    }
}
