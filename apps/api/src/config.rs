use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// OpenRouter key. Without it the job profile step reports a notice.
    pub llm_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub external_call_timeout: Duration,
    pub cache_ttl_secs: u64,
    pub query_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            llm_api_key: std::env::var("LLM_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            external_call_timeout: Duration::from_secs(parse_env("EXTERNAL_CALL_TIMEOUT_SECS", 30)?),
            cache_ttl_secs: parse_env("CACHE_TTL_SECS", 600)?,
            query_ttl_secs: parse_env("QUERY_TTL_SECS", 3600)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
