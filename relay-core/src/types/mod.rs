//! Core types: sender, inbound event, update, relay and lifecycle plumbing, conversion traits.

mod convert;
mod event;
mod relay;
mod sender;

pub use convert::{ToInboundEvent, ToSender};
pub use event::{InboundEvent, Media, Update};
pub use relay::{ErrorSink, LifecycleSignal, RelayCallback};
pub use sender::Sender;
