use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod webhook;

#[derive(Debug, Error)]
pub enum SenderError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// The JSON body posted to a notification webhook (Discord-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub content: String,
    pub username: String,
}

/// A trait for delivering a notification payload to an endpoint.
#[async_trait]
pub trait NotificationSender {
    async fn send(&self, url: &str, payload: &WebhookPayload) -> Result<(), SenderError>;
}
