pub mod server;

use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: SecretString,
        token_ttl_seconds: i64,
    },
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the server fails to start.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Server { .. } => server::handle(self).await,
        }
    }
}
