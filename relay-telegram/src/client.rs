//! Bridge client: binds one connection on `start`, streams updates through the dispatcher into the relay
//! callback, and sends outbound text with `send`. Logs through the injected tracing dispatcher.

use std::sync::{Arc, Mutex, OnceLock};

use futures::StreamExt;
use relay_core::{
    ErrorSink, InboundEvent, LifecycleSignal, RelayCallback, RelayError, TelegramSettings,
};
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info, warn, Dispatch};

use crate::bot_adapter::TeloxideConnector;
use crate::config::PollConfig;
use crate::connection::{Connection, Connector};
use crate::dispatcher::UpdateDispatcher;
use crate::formatter::{DefaultFormatter, Formatter};

/// How a client's run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Update stream closed normally.
    Clean,
    /// Connection or subscription failed.
    Failed,
}

/// Lifecycle: `Uninitialized -> Connecting -> Streaming -> Terminated`. Never goes back; rebuild to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Uninitialized,
    Connecting,
    Streaming,
    Terminated(Termination),
}

/// One Telegram bridge leg.
///
/// Share it behind an `Arc`: `start` runs on its own task while other tasks call `send`.
pub struct Client {
    settings: TelegramSettings,
    connector: Arc<dyn Connector>,
    dispatcher: UpdateDispatcher,
    logger: Dispatch,
    state: Mutex<ClientState>,
    connection: OnceLock<Arc<dyn Connection>>,
    relay: OnceLock<RelayCallback>,
    /// Set by `close`. Binding the connection and checking this flag happen under the same lock.
    close_requested: Mutex<bool>,
}

impl Client {
    /// Creates a client backed by teloxide. Does not connect or validate the token.
    pub fn new(settings: TelegramSettings) -> Self {
        Self::with_connector(settings, Arc::new(TeloxideConnector::new()))
    }

    /// Creates a client with a custom connector (e.g. a custom API URL or a test double).
    pub fn with_connector(settings: TelegramSettings, connector: Arc<dyn Connector>) -> Self {
        let dispatcher = UpdateDispatcher::new(&settings, Arc::new(DefaultFormatter));
        Self {
            settings,
            connector,
            dispatcher,
            logger: tracing::dispatcher::get_default(|current| current.clone()),
            state: Mutex::new(ClientState::Uninitialized),
            connection: OnceLock::new(),
            relay: OnceLock::new(),
            close_requested: Mutex::new(false),
        }
    }

    /// Replaces the logging dispatcher (e.g. `Dispatch::none()` or a capturing subscriber).
    pub fn with_dispatch(mut self, logger: Dispatch) -> Self {
        self.logger = logger;
        self
    }

    /// Replaces the formatting policy.
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.dispatcher = UpdateDispatcher::new(&self.settings, formatter);
        self
    }

    pub fn settings(&self) -> &TelegramSettings {
        &self.settings
    }

    pub fn state(&self) -> ClientState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sends `text` verbatim to the configured chat. Fire-and-forget: failures are logged, not returned.
    pub async fn send(&self, text: &str) {
        self.send_inner(text)
            .with_subscriber(self.logger.clone())
            .await
    }

    /// Connects, subscribes, and relays every message-bearing update until the stream ends.
    ///
    /// Reports connection or subscription failure once on `errors` and returns; reports `Ok(())`
    /// once when the stream closes. Calling it again reports `AlreadyStarted`.
    pub async fn start<F>(&self, errors: ErrorSink, relay: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.run(errors, Arc::new(relay))
            .with_subscriber(self.logger.clone())
            .await
    }

    /// Closes the bound connection, ending the update stream.
    ///
    /// Latches: if `start` has not bound a connection yet, it ends cleanly as soon as it would have,
    /// without subscribing.
    pub fn close(&self) {
        let mut requested = self.close_requested.lock().unwrap_or_else(|e| e.into_inner());
        *requested = true;
        if let Some(connection) = self.connection.get() {
            connection.close();
        }
    }

    async fn send_inner(&self, text: &str) {
        let Some(connection) = self.connection.get() else {
            warn!(error = %RelayError::NotConnected, "Dropping outbound message");
            return;
        };
        if let Err(e) = connection.send_text(&self.settings.chat_id, text).await {
            warn!(error = %e, chat_id = %self.settings.chat_id, "Failed to send message to Telegram");
        }
    }

    async fn run(&self, errors: ErrorSink, relay: RelayCallback) {
        if !self.begin() {
            warn!("Telegram client already started");
            report(&errors, Err(RelayError::AlreadyStarted));
            return;
        }
        if self.close_was_requested() {
            info!("Telegram client closed before connecting");
            self.finish_clean(&errors);
            return;
        }
        info!(chat_id = %self.settings.chat_id, "Starting up Telegram bot");

        let connection = match self.connector.connect(&self.settings.token).await {
            Ok(connection) => connection,
            Err(e) => {
                error!(error = %e, "Failed to connect to Telegram");
                self.set_state(ClientState::Terminated(Termination::Failed));
                report(&errors, Err(e));
                return;
            }
        };
        let _ = self.relay.set(relay);
        if !self.bind(connection.clone()) {
            info!("Telegram client closed before subscribing");
            connection.close();
            self.finish_clean(&errors);
            return;
        }

        let mut updates = match connection.updates(PollConfig::default()).await {
            Ok(updates) => updates,
            Err(e) if self.close_was_requested() => {
                debug!(error = %e, "Subscription ended by close");
                self.finish_clean(&errors);
                return;
            }
            Err(e) => {
                error!(error = %e, "Failed to subscribe to Telegram updates");
                self.set_state(ClientState::Terminated(Termination::Failed));
                report(&errors, Err(e));
                return;
            }
        };
        self.set_state(ClientState::Streaming);
        info!("Telegram update stream open");

        while let Some(update) = updates.next().await {
            match update.event {
                Some(event) => self.handle_event(&event),
                None => debug!(update_id = update.id, "Skipping update without message"),
            }
        }

        info!("Telegram update stream closed");
        self.finish_clean(&errors);
    }

    /// Binds the connection unless `close` already ran; false means the run must stop.
    fn bind(&self, connection: Arc<dyn Connection>) -> bool {
        let requested = self.close_requested.lock().unwrap_or_else(|e| e.into_inner());
        let _ = self.connection.set(connection);
        !*requested
    }

    fn close_was_requested(&self) -> bool {
        *self.close_requested.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn finish_clean(&self, errors: &ErrorSink) {
        self.set_state(ClientState::Terminated(Termination::Clean));
        report(errors, Ok(()));
    }

    /// Relays one event. No lock is held while the callback runs, so it may call back into `send`.
    fn handle_event(&self, event: &InboundEvent) {
        let Some(text) = self.dispatcher.dispatch(event) else {
            return;
        };
        if let Some(relay) = self.relay.get() {
            debug!(kind = event.kind(), "Relaying Telegram message");
            relay(text);
        }
    }

    /// Moves `Uninitialized -> Connecting`; false if the client was already started.
    fn begin(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != ClientState::Uninitialized {
            return false;
        }
        *state = ClientState::Connecting;
        true
    }

    fn set_state(&self, next: ClientState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }
}

fn report(errors: &ErrorSink, signal: LifecycleSignal) {
    if errors.send(signal).is_err() {
        debug!("Error sink closed; lifecycle signal dropped");
    }
}
