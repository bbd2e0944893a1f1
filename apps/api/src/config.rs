use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if the Gemini credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    /// `None` means provider calls may suspend indefinitely.
    pub request_timeout: Option<Duration>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let gemini_api_key = require_env("GEMINI_API_KEY")
            .or_else(|_| require_env("API_KEY"))
            .context("Set GEMINI_API_KEY (or API_KEY) to a Gemini API credential")?;

        Ok(Config {
            gemini_api_key,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            request_timeout: parse_timeout(std::env::var("REQUEST_TIMEOUT_SECS").ok().as_deref())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a whole number, got '{raw}'"))?;
    if secs == 0 {
        bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Some(Duration::from_secs(secs)))
}
