use crate::config::cli::Args;
use crate::error::{GameError, Result};
use chrono::Duration as DateDuration;
use clap::Parser;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

/// How long a fetched release listing is reused before the catalog is asked again.
pub const RELEASE_CACHE_TTL_HOURS: i64 = 24;

pub struct Config {
    pub args: Args,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { args, http_client })
    }

    /// The catalog key, or `MissingCredential` when none was configured.
    pub fn rawg_api_key(&self) -> Result<&str> {
        match self.args.rawg_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(GameError::MissingCredential("API key is missing")),
        }
    }

    pub fn cache_ttl(&self) -> DateDuration {
        DateDuration::hours(RELEASE_CACHE_TTL_HOURS)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }
        if !self.args.cache_dir.exists() {
            std::fs::create_dir_all(&self.args.cache_dir)?;
        }

        info!("Data and cache dirs exist");
        Ok(())
    }
}
