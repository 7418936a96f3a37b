//! Telegram leg settings: token, destination chat, display toggles, rate limit.
//! Loaded from env: BOT_TOKEN, TELEGRAM_CHAT_ID, SHOW_*_MESSAGE, MAX_MESSAGE_PER_MINUTE.

use anyhow::{Context, Result};
use std::env;

const DEFAULT_MAX_MESSAGE_PER_MINUTE: u32 = 20;

/// Settings for one Telegram bridge leg. Read-only for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TelegramSettings {
    /// BOT_TOKEN
    pub token: String,
    /// TELEGRAM_CHAT_ID: signed integer (e.g. `-1001234567890`) or `@channelname`
    pub chat_id: String,
    pub show_join_message: bool,
    pub show_leave_message: bool,
    pub show_kick_message: bool,
    pub show_action_message: bool,
    /// Carried for the supervisor; the leg itself does not throttle.
    pub max_message_per_minute: u32,
}

impl TelegramSettings {
    /// Builds settings with the given token and chat id; toggles off, default rate limit.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            max_message_per_minute: DEFAULT_MAX_MESSAGE_PER_MINUTE,
            ..Self::default()
        }
    }

    /// Loads from environment variables. `token` / `chat_id` override BOT_TOKEN / TELEGRAM_CHAT_ID if provided.
    pub fn from_env(token: Option<String>, chat_id: Option<String>) -> Result<Self> {
        let token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let chat_id = match chat_id {
            Some(c) => c,
            None => env::var("TELEGRAM_CHAT_ID").context("TELEGRAM_CHAT_ID not set")?,
        };
        let max_message_per_minute = match env::var("MAX_MESSAGE_PER_MINUTE") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("MAX_MESSAGE_PER_MINUTE is not a number: {}", s))?,
            Err(_) => DEFAULT_MAX_MESSAGE_PER_MINUTE,
        };

        Ok(Self {
            token,
            chat_id,
            show_join_message: env_flag("SHOW_JOIN_MESSAGE")?,
            show_leave_message: env_flag("SHOW_LEAVE_MESSAGE")?,
            show_kick_message: env_flag("SHOW_KICK_MESSAGE")?,
            show_action_message: env_flag("SHOW_ACTION_MESSAGE")?,
            max_message_per_minute,
        })
    }

    /// Numeric form of the chat id, or None for channel usernames.
    pub fn numeric_chat_id(&self) -> Option<i64> {
        self.chat_id.trim().parse().ok()
    }
}

/// Reads a boolean env var; unset means false.
fn env_flag(name: &str) -> Result<bool> {
    match env::var(name) {
        Ok(v) => parse_flag(&v).with_context(|| format!("{} is not a boolean: {}", name, v)),
        Err(_) => Ok(false),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
