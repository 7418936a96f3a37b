//! Wraps teloxide::Bot and implements [`Connector`] / [`Connection`]. Production code talks to Telegram here;
//! tests substitute another Connection impl.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_core::{RelayError, Result, Update};
use teloxide::prelude::*;
use teloxide::requests::Request;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::adapters::{recipient_for, to_core_update};
use crate::config::{PollConfig, LONG_POLL_TIMEOUT_SECS, POLL_RETRY_DELAY};
use crate::connection::{Connection, Connector, UpdateStream};

/// HTTP timeout headroom on top of the long-poll window.
const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Builds teloxide connections. Holds only configuration; never touches the network until `connect`.
#[derive(Debug, Clone)]
pub struct TeloxideConnector {
    api_url: Option<reqwest::Url>,
    poll_timeout: Duration,
    retry_delay: Duration,
}

impl Default for TeloxideConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl TeloxideConnector {
    pub fn new() -> Self {
        Self {
            api_url: None,
            poll_timeout: Duration::from_secs(LONG_POLL_TIMEOUT_SECS as u64),
            retry_delay: POLL_RETRY_DELAY,
        }
    }

    /// Points the bot at a custom Bot API server (TELEGRAM_API_URL).
    pub fn with_api_url(mut self, url: reqwest::Url) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Pause between a failed getUpdates and the next attempt.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn build_bot(&self, token: &str) -> Result<teloxide::Bot> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(self.poll_timeout + HTTP_TIMEOUT_MARGIN)
            .build()
            .map_err(|e| RelayError::Connect(e.to_string()))?;
        let bot = teloxide::Bot::with_client(token, client);
        Ok(match &self.api_url {
            Some(url) => bot.set_api_url(url.clone()),
            None => bot,
        })
    }
}

#[async_trait]
impl Connector for TeloxideConnector {
    async fn connect(&self, token: &str) -> Result<Arc<dyn Connection>> {
        let bot = self.build_bot(token)?;
        let me = bot
            .get_me()
            .await
            .map_err(|e| RelayError::Connect(e.to_string()))?;
        info!(
            bot_id = me.user.id.0,
            username = me.user.username.as_deref().unwrap_or(""),
            "Connected to Telegram"
        );
        Ok(Arc::new(
            TeloxideConnection::new(bot).with_retry_delay(self.retry_delay),
        ))
    }
}

/// Live teloxide connection. `teloxide::Bot` is a cheap, thread-safe handle, so sends and polling share it freely.
pub struct TeloxideConnection {
    bot: teloxide::Bot,
    closed: watch::Sender<bool>,
    retry_delay: Duration,
}

impl TeloxideConnection {
    pub fn new(bot: teloxide::Bot) -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            bot,
            closed,
            retry_delay: POLL_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

#[async_trait]
impl Connection for TeloxideConnection {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        self.bot
            .send_message(recipient_for(chat_id), text.to_string())
            .await
            .map_err(|e| RelayError::Send(e.to_string()))?;
        Ok(())
    }

    async fn updates(&self, poll: PollConfig) -> Result<UpdateStream> {
        if self.is_closed() {
            return Err(RelayError::Subscribe("connection closed".to_string()));
        }
        let state = PollState {
            bot: self.bot.clone(),
            offset: poll.offset,
            timeout_secs: poll.timeout_secs,
            retry_delay: self.retry_delay,
            closed: self.closed.subscribe(),
            pending: VecDeque::new(),
        };
        Ok(Box::pin(futures::stream::unfold(state, next_update)))
    }

    fn close(&self) {
        self.closed.send_replace(true);
    }
}

/// getUpdates loop state carried between stream items.
struct PollState {
    bot: teloxide::Bot,
    offset: i32,
    timeout_secs: u32,
    retry_delay: Duration,
    closed: watch::Receiver<bool>,
    pending: VecDeque<teloxide::types::Update>,
}

/// Yields the next buffered update, long-polling when the buffer is empty. Ends once the connection closes.
async fn next_update(mut state: PollState) -> Option<(Update, PollState)> {
    loop {
        if let Some(update) = state.pending.pop_front() {
            return Some((to_core_update(&update), state));
        }
        if *state.closed.borrow() {
            return None;
        }

        let request = state
            .bot
            .get_updates()
            .offset(state.offset)
            .timeout(state.timeout_secs)
            .send();

        tokio::select! {
            _ = async { let _ = state.closed.wait_for(|closed| *closed).await; } => return None,
            result = request => match result {
                Ok(updates) => {
                    if let Some(last) = updates.last() {
                        state.offset = last.id.0 as i32 + 1;
                    }
                    debug!(count = updates.len(), offset = state.offset, "getUpdates returned");
                    state.pending.extend(updates);
                }
                Err(e) => {
                    warn!(error = %e, "getUpdates failed, retrying");
                    tokio::select! {
                        _ = async { let _ = state.closed.wait_for(|closed| *closed).await; } => return None,
                        _ = tokio::time::sleep(state.retry_delay) => {}
                    }
                }
            }
        }
    }
}
