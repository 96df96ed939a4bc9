use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::chat::formatter::ResponseMode;
use crate::llm_client::DEFAULT_API_BASE;
use crate::retrieval::scoring::DEFAULT_LIMIT;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile_path: PathBuf,
    /// Server-held completions key. Absent means users must bring their own.
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    /// When set, chat augmentation is forwarded here instead of run in process.
    pub augment_gateway_url: Option<String>,
    pub augment_timeout: Duration,
    pub retrieval_limit: usize,
    pub default_mode: ResponseMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let augment_timeout_secs = match get("AUGMENT_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("AUGMENT_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 15,
        };

        let retrieval_limit = match get("RETRIEVAL_LIMIT") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow!("RETRIEVAL_LIMIT must be a positive integer"))?,
            None => DEFAULT_LIMIT,
        };

        let default_mode = match get("DEFAULT_MODE") {
            Some(v) => v.parse::<ResponseMode>().map_err(|e| anyhow!("DEFAULT_MODE: {e}"))?,
            None => ResponseMode::Brief,
        };

        Ok(Config {
            profile_path: get("PROFILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/profile.json")),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_api_base: get("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            augment_gateway_url: get("AUGMENT_GATEWAY_URL"),
            augment_timeout: Duration::from_secs(augment_timeout_secs),
            retrieval_limit,
            default_mode,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
