//! Turns one inbound event into at most one line of relay text, applying the leg's display toggles.

use std::sync::Arc;

use relay_core::{InboundEvent, TelegramSettings};
use tracing::{debug, warn};

use crate::formatter::Formatter;

const ACTION_PREFIX: &str = "/me ";

/// Pure event-to-text step. Never touches the network and holds no mutable state.
#[derive(Clone)]
pub struct UpdateDispatcher {
    expected_chat_id: Option<i64>,
    show_join: bool,
    show_leave: bool,
    show_kick: bool,
    show_action: bool,
    formatter: Arc<dyn Formatter>,
}

impl UpdateDispatcher {
    /// Builds a dispatcher from settings. A non-numeric chat id disables the chat filter.
    pub fn new(settings: &TelegramSettings, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            expected_chat_id: settings.numeric_chat_id(),
            show_join: settings.show_join_message,
            show_leave: settings.show_leave_message,
            show_kick: settings.show_kick_message,
            show_action: settings.show_action_message,
            formatter,
        }
    }

    /// Returns the text to relay for `event`, or None if the event is filtered out.
    pub fn dispatch(&self, event: &InboundEvent) -> Option<String> {
        if let Some(expected) = self.expected_chat_id {
            if event.chat_id() != expected {
                warn!(
                    chat_id = event.chat_id(),
                    expected_chat_id = expected,
                    kind = event.kind(),
                    "Ignoring event from unexpected chat"
                );
                return None;
            }
        }

        let f = &self.formatter;
        let text = match event {
            InboundEvent::Text { sender, text, .. } => match text.strip_prefix(ACTION_PREFIX) {
                Some(action) if self.show_action => f.action(sender, action),
                _ => f.message(sender, text),
            },
            InboundEvent::Join { members, .. } if self.show_join => f.join(members),
            InboundEvent::Leave { member, .. } if self.show_leave => f.leave(member),
            InboundEvent::Kick { member, by, .. } if self.show_kick => f.kick(member, by),
            InboundEvent::Media { sender, media, .. } => f.media(sender, media),
            InboundEvent::Join { .. }
            | InboundEvent::Leave { .. }
            | InboundEvent::Kick { .. }
            | InboundEvent::Other { .. } => {
                debug!(kind = event.kind(), "Event not relayed");
                return None;
            }
        };
        Some(text)
    }
}
