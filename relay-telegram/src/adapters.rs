//! Adapters from Telegram (teloxide) types to relay_core types.
//! Depends only on teloxide and relay_core type definitions.

use relay_core::{InboundEvent, Media, Sender, ToInboundEvent, ToSender, Update};
use teloxide::types::{ChatId, Recipient, UpdateKind};

/// Wraps a teloxide User for conversion to core [`Sender`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToSender for TelegramUserWrapper<'a> {
    fn to_sender(&self) -> Sender {
        Sender {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: self.0.first_name.clone(),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`InboundEvent`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToInboundEvent for TelegramMessageWrapper<'a> {
    fn to_event(&self) -> InboundEvent {
        let msg = self.0;
        let chat_id = msg.chat.id.0;

        if let Some(text) = msg.text() {
            return InboundEvent::Text {
                chat_id,
                sender: self.sender(),
                text: text.to_string(),
            };
        }

        if let Some(members) = msg.new_chat_members() {
            return InboundEvent::Join {
                chat_id,
                members: members
                    .iter()
                    .map(|u| TelegramUserWrapper(u).to_sender())
                    .collect(),
            };
        }

        if let Some(left) = msg.left_chat_member() {
            let member = TelegramUserWrapper(left).to_sender();
            return match msg.from.as_ref().filter(|from| from.id != left.id) {
                Some(by) => InboundEvent::Kick {
                    chat_id,
                    member,
                    by: TelegramUserWrapper(by).to_sender(),
                },
                None => InboundEvent::Leave { chat_id, member },
            };
        }

        match self.media() {
            Some(media) => InboundEvent::Media {
                chat_id,
                sender: self.sender(),
                media,
            },
            None => InboundEvent::Other { chat_id },
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Author of the message; channel posts and anonymous admins have none.
    fn sender(&self) -> Sender {
        self.0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_sender())
            .unwrap_or_default()
    }

    fn media(&self) -> Option<Media> {
        let caption = self.0.caption().map(str::to_string);
        if let Some(sticker) = self.0.sticker() {
            return Some(Media::Sticker {
                emoji: sticker.emoji.clone(),
            });
        }
        if self.0.photo().is_some() {
            return Some(Media::Photo { caption });
        }
        self.0.document().map(|doc| Media::Document {
            file_name: doc.file_name.clone(),
            caption,
        })
    }
}

/// Converts a teloxide update; only `Message` updates carry a payload.
pub(crate) fn to_core_update(update: &teloxide::types::Update) -> Update {
    let event = match &update.kind {
        UpdateKind::Message(msg) => Some(TelegramMessageWrapper(msg).to_event()),
        _ => None,
    };
    Update::new(update.id.0 as i64, event)
}

/// Destination for an outbound message: numeric chat ids map to `Recipient::Id`, anything else is a channel username.
pub fn recipient_for(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
    }
}
