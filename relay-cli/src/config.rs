//! Binary config: leg settings plus Bot API URL override and log file. Loaded from env.

use anyhow::Result;
use relay_core::TelegramSettings;
use std::env;

/// Everything the binary needs to run one leg.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub settings: TelegramSettings,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
}

impl BridgeConfig {
    /// Loads from environment variables. `token` / `chat_id` override BOT_TOKEN / TELEGRAM_CHAT_ID if provided.
    pub fn load(token: Option<String>, chat_id: Option<String>) -> Result<Self> {
        let settings = TelegramSettings::from_env(token, chat_id)?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/tgrelay.log".to_string());

        Ok(Self {
            settings,
            telegram_api_url,
            log_file,
        })
    }

    /// Validate config (telegram_api_url must be a valid URL if set).
    pub fn validate(&self) -> Result<()> {
        self.api_url()?;
        Ok(())
    }

    /// Parsed API URL override, if any.
    pub fn api_url(&self) -> Result<Option<reqwest::Url>> {
        match &self.telegram_api_url {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => Ok(Some(url)),
                Err(_) => anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                ),
            },
            None => Ok(None),
        }
    }
}
