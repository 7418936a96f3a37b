//! # relay-telegram
//!
//! Telegram bridge leg: [`Client`] owns one connection, long-polls its update stream, turns each
//! message into at most one relayed line via [`UpdateDispatcher`], and pushes text back with [`Client::send`].
//! Network access sits behind [`Connector`] / [`Connection`]; [`TeloxideConnector`] is the production implementation.

mod adapters;
mod bot_adapter;
mod client;
mod config;
mod connection;
mod dispatcher;
mod formatter;

pub use adapters::{recipient_for, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{TeloxideConnection, TeloxideConnector};
pub use client::{Client, ClientState, Termination};
pub use config::{PollConfig, LONG_POLL_TIMEOUT_SECS, POLL_RETRY_DELAY};
pub use connection::{Connection, Connector, UpdateStream};
pub use dispatcher::UpdateDispatcher;
pub use formatter::{DefaultFormatter, Formatter};
