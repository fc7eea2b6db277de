use crate::config::TwilioConfig;
use crate::notify::{Channel, MessageSender};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Sends through the Twilio Messages API. The WhatsApp channel is the same
/// endpoint with `whatsapp:`-prefixed addresses.
pub struct TwilioSender {
    client: reqwest::Client,
    channel: Channel,
    messages_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    status: Option<String>,
}

impl TwilioSender {
    pub fn new(config: &TwilioConfig, channel: Channel, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building gateway HTTP client")?;

        let from = match channel {
            Channel::Sms => config.sms_from.clone(),
            Channel::WhatsApp => config.whatsapp_from.clone(),
        };

        Ok(Self {
            client,
            channel,
            messages_url: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.api_base.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from,
        })
    }

    fn address(&self, number: &str) -> String {
        match self.channel {
            Channel::Sms => number.to_string(),
            Channel::WhatsApp if number.starts_with("whatsapp:") => number.to_string(),
            Channel::WhatsApp => format!("whatsapp:{}", number),
        }
    }
}

#[async_trait]
impl MessageSender for TwilioSender {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let to = self.address(to);
        let from = self.address(&self.from);

        let response = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to.as_str()), ("From", from.as_str()), ("Body", body)])
            .send()
            .await
            .with_context(|| format!("{} request to {} failed", self.channel, to))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("{} gateway returned {} for {}: {}", self.channel, status, to, detail);
        }

        let message: MessageResource = response
            .json()
            .await
            .with_context(|| format!("decoding {} gateway response", self.channel))?;
        debug!(
            channel = %self.channel,
            sid = %message.sid,
            status = ?message.status,
            "Message accepted for {}",
            to
        );
        Ok(())
    }
}
