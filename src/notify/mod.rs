//! Outbound phone messaging for water quality alerts.

pub mod templates;
pub mod twilio;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::info;

static E164: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[0-9]{10,15}$").expect("E.164 pattern is valid"));

/// True for a `+` followed by 10 to 15 digits, nothing else.
pub fn is_valid_e164(number: &str) -> bool {
    E164.is_match(number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    WhatsApp,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Sms => f.write_str("sms"),
            Channel::WhatsApp => f.write_str("whatsapp"),
        }
    }
}

#[async_trait]
pub trait MessageSender: Send + Sync {
    fn channel(&self) -> Channel;

    /// Delivers `body` to an E.164 number.
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Stand-in used when no gateway credentials are configured.
pub struct LogSender {
    channel: Channel,
}

impl LogSender {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl MessageSender for LogSender {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        info!(channel = %self.channel, to, "Gateway not configured, dropping message: {}", body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_e164_validation() {
        assert!(is_valid_e164("+911234567890"));
        assert!(is_valid_e164("+1234567890"));
        assert!(is_valid_e164("+123456789012345"));

        assert!(!is_valid_e164("invalid"));
        assert!(!is_valid_e164("911234567890"));
        assert!(!is_valid_e164("+123456789"));
        assert!(!is_valid_e164("+1234567890123456"));
        assert!(!is_valid_e164("+91 12345 67890"));
        assert!(!is_valid_e164("+911234567890\n"));
        assert!(!is_valid_e164(""));
    }
}
