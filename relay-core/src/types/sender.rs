//! Sender identity for inbound events.

/// Author of an inbound event (user id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Sender {
    /// Name shown on the other side of the bridge: username if set, else "first last".
    pub fn display_name(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return username.to_string();
        }
        match self.last_name.as_deref().filter(|l| !l.is_empty()) {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(username: Option<&str>, first: &str, last: Option<&str>) -> Sender {
        Sender {
            id: 1,
            username: username.map(str::to_string),
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(sender(Some("alice"), "Alice", Some("Smith")).display_name(), "alice");
    }

    #[test]
    fn test_display_name_falls_back_to_full_name() {
        assert_eq!(sender(None, "Alice", Some("Smith")).display_name(), "Alice Smith");
        assert_eq!(sender(Some(""), "Alice", None).display_name(), "Alice");
    }
}
