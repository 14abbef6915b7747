//! Bot config: Telegram access plus reply and polling tuning. Loaded from env.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracker_telegram::{PollerConfig, TelegramConfig};


pub const DEFAULT_LOG_FILE: &str = "logs/drift-tracker.log";

/// Everything `run_bot` needs.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// LOG_FILE, default `logs/drift-tracker.log`
    pub log_file: String,
    /// REPLY_TIMEOUT_SECS: how long a question waits for its answer
    pub reply_timeout: Duration,
    /// POLL_TIMEOUT_SECS: long-poll timeout of one getUpdates call
    pub poll_timeout: Duration,
    /// POLL_INTERVAL_MS: pause between polling cycles
    pub poll_interval: Duration,
    /// UPDATES_LIMIT: max updates per batch
    pub updates_limit: u8,
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let log_file = telegram
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            telegram,
            log_file,
            reply_timeout: Duration::from_secs(env_or("REPLY_TIMEOUT_SECS", 300u64)?),
            poll_timeout: Duration::from_secs(env_or("POLL_TIMEOUT_SECS", 15u64)?),
            poll_interval: Duration::from_millis(env_or("POLL_INTERVAL_MS", 2000u64)?),
            updates_limit: env_or("UPDATES_LIMIT", 10u8)?,
        })
    }

    /// Rejects an empty token, zero durations or limit, and an unparsable API URL.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if self.reply_timeout.is_zero() {
            anyhow::bail!("REPLY_TIMEOUT_SECS must be greater than 0");
        }
        if self.poll_timeout.is_zero() {
            anyhow::bail!("POLL_TIMEOUT_SECS must be greater than 0");
        }
        if self.poll_interval.is_zero() {
            anyhow::bail!("POLL_INTERVAL_MS must be greater than 0");
        }
        if self.updates_limit == 0 {
            anyhow::bail!("UPDATES_LIMIT must be greater than 0");
        }
        self.telegram.api_url()?;
        Ok(())
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            limit: self.updates_limit,
            long_poll_timeout: self.poll_timeout,
            interval: self.poll_interval,
        }
    }
}
