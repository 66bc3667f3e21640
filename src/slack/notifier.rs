use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{error::DeliveryError, slack::SlackMessage};

/// Delivers one composed message. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns a confirmation line echoing the delivered text.
    async fn notify(&self, text: &str) -> Result<String, DeliveryError>;
}

pub fn confirmation(text: &str) -> String {
    format!("Send message detail: {text}")
}

/// Posts to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackWebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeliveryError::Client)?;

        Ok(Self::with_client(client, webhook_url))
    }

    pub fn with_client(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackWebhookNotifier {
    async fn notify(&self, text: &str) -> Result<String, DeliveryError> {
        // the webhook URL is a credential; keep it out of errors
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&SlackMessage::new(text))
            .send()
            .await
            .map_err(|e| DeliveryError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "webhook accepted message");

        Ok(confirmation(text))
    }
}
