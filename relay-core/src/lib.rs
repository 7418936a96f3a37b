//! # relay-core
//!
//! Core types for one bridge leg: [`TelegramSettings`], the tagged [`InboundEvent`] model,
//! relay callback and error sink types, [`RelayError`], and tracing initialization.
//! Transport-agnostic; used by relay-telegram and relay-cli.

pub mod error;
pub mod logger;
pub mod settings;
pub mod types;

pub use error::{RelayError, Result};
pub use logger::{init_tracing, log_filter, log_writer, DEFAULT_LOG_FILTER};
pub use settings::TelegramSettings;
pub use types::{
    ErrorSink, InboundEvent, LifecycleSignal, Media, RelayCallback, Sender, ToInboundEvent,
    ToSender, Update,
};
