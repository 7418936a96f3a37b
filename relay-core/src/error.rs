//! Error types for the bridge leg.
//!
//! [`RelayError`] covers every failure a leg can report on its error sink or log locally.

use thiserror::Error;

/// Top-level error for a bridge leg (connection, subscription, outbound send, lifecycle).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Connect error: {0}")]
    Connect(String),

    #[error("Subscribe error: {0}")]
    Subscribe(String),

    #[error("Send error: {0}")]
    Send(String),

    #[error("Client already started")]
    AlreadyStarted,

    #[error("Client is not connected")]
    NotConnected,
}

/// Result type for bridge operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
