use anyhow::{Context, Result};
use clap::{Arg, Command};

pub const ARG_TOKEN_TTL_SECONDS: &str = "token-ttl-seconds";

const DEFAULT_TOKEN_TTL_SECONDS: &str = "43200";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_TOKEN_TTL_SECONDS)
            .long(ARG_TOKEN_TTL_SECONDS)
            .help("Expiry window in seconds for tokens issued without remember_me")
            .default_value(DEFAULT_TOKEN_TTL_SECONDS)
            .env("KIMLIK_TOKEN_TTL_SECONDS")
            .value_parser(clap::value_parser!(i64).range(60..)),
    )
}

#[derive(Debug)]
pub struct Options {
    pub token_ttl_seconds: i64,
}

impl Options {
    /// Extract auth options from parsed matches.
    ///
    /// # Errors
    /// Returns an error if the argument is missing despite its default.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let token_ttl_seconds = matches
            .get_one::<i64>(ARG_TOKEN_TTL_SECONDS)
            .copied()
            .context("missing token-ttl-seconds")?;
        Ok(Self { token_ttl_seconds })
    }
}
