use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{NotificationSender, SenderError, WebhookPayload};

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts notification payloads to an externally configured webhook URL.
pub struct WebhookSender {
    client: Client,
}

impl WebhookSender {
    pub fn new() -> Self {
        WebhookSender {
            client: Client::new(),
        }
    }
}

impl Default for WebhookSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for WebhookSender {
    async fn send(&self, url: &str, payload: &WebhookPayload) -> Result<(), SenderError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .timeout(SEND_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SenderError::SendFailed(format!(
                "webhook returned non-success status: {status}"
            )));
        }
        Ok(())
    }
}
