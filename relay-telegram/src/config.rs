//! Long-poll parameters for the update subscription.

use std::time::Duration;

/// Seconds the network holds a getUpdates request open waiting for new updates.
pub const LONG_POLL_TIMEOUT_SECS: u32 = 60;

/// Pause before re-polling after a transient getUpdates failure.
pub const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Subscription parameters: starting offset and long-poll timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub offset: i32,
    pub timeout_secs: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            timeout_secs: LONG_POLL_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_config() {
        let poll = PollConfig::default();
        assert_eq!(poll.offset, 0);
        assert_eq!(poll.timeout_secs, 60);
    }
}
