//! Minimal bot config: token, API URL, log path, allow-list.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE and ALLOWED_USERS.

use anyhow::{Context, Result};
use std::env;
use tracing::error;

pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    /// Empty when ALLOWED_USERS is unset.
    pub allowed_users: Vec<i64>,
}

impl TelegramConfig {
    /// BOT_TOKEN is required; the rest is optional. A malformed ALLOWED_USERS is an error.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        let allowed_users = match env::var("ALLOWED_USERS") {
            Ok(raw) => parse_allowed_users(&raw)?,
            Err(_) => Vec::new(),
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            allowed_users,
        })
    }

    /// Uses the given token, everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
            allowed_users: Vec::new(),
        }
    }

    /// LOG_FILE if set, else `logs/<name>.log`.
    pub fn log_file_or(&self, name: &str) -> String {
        self.log_file
            .clone()
            .unwrap_or_else(|| format!("logs/{}.log", name))
    }

    /// Builds the teloxide client, pointing it at the custom API URL when one is configured.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

/// Parses a comma-separated list of user ids. Blank entries are skipped.
pub fn parse_allowed_users(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("Invalid user id in ALLOWED_USERS: {:?}", s))
        })
        .collect()
}
