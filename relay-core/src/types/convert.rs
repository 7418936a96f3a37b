//! Conversion traits from transport-specific types into the core event model.

use super::{event::InboundEvent, sender::Sender};

/// Converts a transport-specific user type to core [`Sender`].
pub trait ToSender: Send + Sync {
    fn to_sender(&self) -> Sender;
}

/// Converts a transport-specific message type to core [`InboundEvent`].
pub trait ToInboundEvent: Send + Sync {
    fn to_event(&self) -> InboundEvent;
}
