//! Plumbing between a bridge leg and its supervisor: the relay callback and the error/lifecycle sink.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::RelayError;

/// Forwards one finalized line of text to the rest of the system. Must be cheap and non-blocking.
pub type RelayCallback = Arc<dyn Fn(String) + Send + Sync>;

/// `Err` reports a connection or subscription failure; `Ok(())` is the terminal clean-shutdown signal.
pub type LifecycleSignal = Result<(), RelayError>;

/// Write side of the error/lifecycle channel consumed by the supervisor.
pub type ErrorSink = mpsc::UnboundedSender<LifecycleSignal>;
