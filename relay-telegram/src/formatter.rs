//! Formatting policy: how each kind of inbound event reads on the other side of the bridge.

use relay_core::{Media, Sender};

/// Renders inbound events as relay text. Implementations must be pure and cheap.
pub trait Formatter: Send + Sync {
    fn message(&self, sender: &Sender, text: &str) -> String;
    /// `/me`-style action; `action` has the `/me ` prefix stripped.
    fn action(&self, sender: &Sender, action: &str) -> String;
    fn join(&self, members: &[Sender]) -> String;
    fn leave(&self, member: &Sender) -> String;
    fn kick(&self, member: &Sender, by: &Sender) -> String;
    fn media(&self, sender: &Sender, media: &Media) -> String;
}

/// IRC-style rendering: `<name> text`, `* name action`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn message(&self, sender: &Sender, text: &str) -> String {
        format!("<{}> {}", sender.display_name(), text)
    }

    fn action(&self, sender: &Sender, action: &str) -> String {
        format!("* {} {}", sender.display_name(), action)
    }

    fn join(&self, members: &[Sender]) -> String {
        let names: Vec<String> = members.iter().map(Sender::display_name).collect();
        format!("* {} joined the group", names.join(", "))
    }

    fn leave(&self, member: &Sender) -> String {
        format!("* {} left the group", member.display_name())
    }

    fn kick(&self, member: &Sender, by: &Sender) -> String {
        format!(
            "* {} was removed by {}",
            member.display_name(),
            by.display_name()
        )
    }

    fn media(&self, sender: &Sender, media: &Media) -> String {
        let body = match media {
            Media::Sticker { emoji } => match emoji {
                Some(e) => format!("[sticker {}]", e),
                None => "[sticker]".to_string(),
            },
            Media::Photo { caption } => with_caption("[photo]".to_string(), caption),
            Media::Document { file_name, caption } => {
                let tag = match file_name {
                    Some(name) => format!("[document {}]", name),
                    None => "[document]".to_string(),
                };
                with_caption(tag, caption)
            }
        };
        format!("<{}> {}", sender.display_name(), body)
    }
}

fn with_caption(tag: String, caption: &Option<String>) -> String {
    match caption.as_deref().filter(|c| !c.is_empty()) {
        Some(c) => format!("{} {}", tag, c),
        None => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> Sender {
        Sender {
            id: 1,
            username: Some(name.to_string()),
            first_name: name.to_string(),
            last_name: None,
        }
    }

    #[test]
    fn test_message_and_action() {
        let f = DefaultFormatter;
        assert_eq!(f.message(&user("alice"), "hello"), "<alice> hello");
        assert_eq!(f.action(&user("alice"), "waves"), "* alice waves");
    }

    #[test]
    fn test_membership() {
        let f = DefaultFormatter;
        assert_eq!(
            f.join(&[user("alice"), user("bob")]),
            "* alice, bob joined the group"
        );
        assert_eq!(f.leave(&user("bob")), "* bob left the group");
        assert_eq!(
            f.kick(&user("bob"), &user("admin")),
            "* bob was removed by admin"
        );
    }

    #[test]
    fn test_media() {
        let f = DefaultFormatter;
        let alice = user("alice");
        assert_eq!(
            f.media(&alice, &Media::Sticker { emoji: Some("😀".to_string()) }),
            "<alice> [sticker 😀]"
        );
        assert_eq!(f.media(&alice, &Media::Sticker { emoji: None }), "<alice> [sticker]");
        assert_eq!(
            f.media(&alice, &Media::Photo { caption: Some("sunset".to_string()) }),
            "<alice> [photo] sunset"
        );
        assert_eq!(
            f.media(
                &alice,
                &Media::Document {
                    file_name: Some("notes.pdf".to_string()),
                    caption: None,
                }
            ),
            "<alice> [document notes.pdf]"
        );
    }
}
