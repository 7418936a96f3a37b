//! Network seam for a bridge leg. [`Client`](crate::Client) only talks to the network through these traits,
//! so tests can substitute scripted connections.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use relay_core::{Result, Update};

use crate::config::PollConfig;

/// Stream of inbound updates; ends when the connection is closed.
pub type UpdateStream = BoxStream<'static, Update>;

/// Opens a connection for a bot token.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establishes (and verifies) a connection. Failure maps to `RelayError::Connect`.
    async fn connect(&self, token: &str) -> Result<Arc<dyn Connection>>;
}

/// A live connection. Must be safe for concurrent use: the update stream and `send_text` run from different tasks.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Sends `text` verbatim to `chat_id`.
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()>;

    /// Subscribes to inbound updates. Failure maps to `RelayError::Subscribe`.
    async fn updates(&self, poll: PollConfig) -> Result<UpdateStream>;

    /// Closes the connection; any open update stream ends.
    fn close(&self);
}
