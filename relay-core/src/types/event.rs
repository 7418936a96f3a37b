//! Inbound event model: one update from the network's stream, with an optional tagged payload.

use super::sender::Sender;

/// One unit from the update stream. `event` is None for updates without a message payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub id: i64,
    pub event: Option<InboundEvent>,
}

impl Update {
    pub fn new(id: i64, event: Option<InboundEvent>) -> Self {
        Self { id, event }
    }
}

/// Non-text payloads that are still relayed as a short description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Sticker { emoji: Option<String> },
    Photo { caption: Option<String> },
    Document {
        file_name: Option<String>,
        caption: Option<String>,
    },
}

/// A message-bearing event from the network, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Plain chat text.
    Text {
        chat_id: i64,
        sender: Sender,
        text: String,
    },
    /// One or more members joined.
    Join { chat_id: i64, members: Vec<Sender> },
    /// A member left on their own.
    Leave { chat_id: i64, member: Sender },
    /// A member was removed by someone else.
    Kick {
        chat_id: i64,
        member: Sender,
        by: Sender,
    },
    Media {
        chat_id: i64,
        sender: Sender,
        media: Media,
    },
    /// Any other message kind (pins, polls, service messages, ...).
    Other { chat_id: i64 },
}

impl InboundEvent {
    /// Chat the event originated in.
    pub fn chat_id(&self) -> i64 {
        match self {
            InboundEvent::Text { chat_id, .. }
            | InboundEvent::Join { chat_id, .. }
            | InboundEvent::Leave { chat_id, .. }
            | InboundEvent::Kick { chat_id, .. }
            | InboundEvent::Media { chat_id, .. }
            | InboundEvent::Other { chat_id } => *chat_id,
        }
    }

    /// Short kind label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Text { .. } => "text",
            InboundEvent::Join { .. } => "join",
            InboundEvent::Leave { .. } => "leave",
            InboundEvent::Kick { .. } => "kick",
            InboundEvent::Media { .. } => "media",
            InboundEvent::Other { .. } => "other",
        }
    }
}
