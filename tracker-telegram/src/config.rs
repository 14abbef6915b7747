//! Transport configuration: token, optional Bot API endpoint, log file path.
//! Loaded from the BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL) and LOG_FILE environment variables.

use std::env;

use anyhow::Result;
use tracker_core::TrackerError;

/// Telegram access and logging settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from the environment: BOT_TOKEN is required, TELEGRAM_API_URL and LOG_FILE are optional.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`TelegramConfig::from_env`], but `token` (when given) overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds with the given token and no optional settings.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Parsed custom endpoint, `None` for the public Bot API.
    pub fn api_url(&self) -> tracker_core::Result<Option<reqwest::Url>> {
        self.telegram_api_url
            .as_deref()
            .map(|raw| {
                reqwest::Url::parse(raw)
                    .map_err(|e| TrackerError::Config(format!("Invalid TELEGRAM_API_URL {}: {}", raw, e)))
            })
            .transpose()
    }
}
