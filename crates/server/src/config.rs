//! Server configuration from environment variables.

use eyre::WrapErr;
use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_MAX_TEXT_BYTES: usize = 64 * 1024;
pub const DEFAULT_ANALYSIS_CACHE_BYTES: u64 = 32 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// `SERVER_URL`, the address to listen on.
    pub server_url: SocketAddr,
    /// `HANZI_FREQUENCY_TABLE`, the bundled table is used if unset.
    pub frequency_table: Option<PathBuf>,
    /// `HANZI_PHRASE_TABLE`, phrase readings added to the bundled ones.
    pub phrase_table: Option<PathBuf>,
    /// `HANZI_MAX_TEXT_BYTES`, longer texts are rejected.
    pub max_text_bytes: usize,
    /// `HANZI_ANALYSIS_CACHE_BYTES`, the total size of the texts kept in the analysis cache.
    pub analysis_cache_bytes: u64,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let server_url = var("SERVER_URL")
            .ok_or_else(|| eyre::eyre!("Missing SERVER_URL"))?
            .parse::<SocketAddr>()
            .wrap_err("Invalid SERVER_URL")?;
        let frequency_table = var("HANZI_FREQUENCY_TABLE").map(PathBuf::from);
        let phrase_table = var("HANZI_PHRASE_TABLE").map(PathBuf::from);
        let max_text_bytes = parse_or(&var, "HANZI_MAX_TEXT_BYTES", DEFAULT_MAX_TEXT_BYTES)?;
        let analysis_cache_bytes =
            parse_or(&var, "HANZI_ANALYSIS_CACHE_BYTES", DEFAULT_ANALYSIS_CACHE_BYTES)?;
        Ok(Self {
            server_url,
            frequency_table,
            phrase_table,
            max_text_bytes,
            analysis_cache_bytes,
        })
    }
}

fn parse_or<T>(var: impl Fn(&str) -> Option<String>, key: &str, default: T) -> eyre::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(value) => value
            .parse::<T>()
            .wrap_err_with(|| format!("Invalid {key} '{value}'")),
        None => Ok(default),
    }
}
