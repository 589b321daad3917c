use crate::api;
use crate::api::handlers::auth::AuthConfig;
use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};
use secrecy::ExposeSecret;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    let Action::Server {
        port,
        dsn,
        token_ttl_seconds,
    } = action;

    // Fail early on malformed connection strings.
    let parsed = Url::parse(dsn.expose_secret()).context("Invalid database DSN")?;
    if !matches!(parsed.scheme(), "postgres" | "postgresql") {
        return Err(anyhow!("Unsupported DSN scheme: {}", parsed.scheme()));
    }

    let config = AuthConfig::new().with_token_ttl_seconds(token_ttl_seconds);

    api::new(port, dsn.expose_secret().to_string(), config).await?;

    Ok(())
}
