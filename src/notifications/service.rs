use sea_orm::DatabaseConnection;
use tracing::{debug, error};

use super::senders::webhook::WebhookSender;
use super::senders::{NotificationSender, WebhookPayload};
use crate::db::services as db_services;

const MESSAGE_PREFIX: &str = "[Ptero Manager]";
const BOT_USERNAME: &str = "Ptero Manager Bot";

/// Best-effort event notifications. Delivery goes to the webhook configured
/// in the database; when no config exists, or it is disabled or has an empty
/// URL, nothing leaves the process. Failures are logged and swallowed, so
/// callers can fire notifications without caring about the outcome.
pub struct NotificationService {
    db: DatabaseConnection,
    sender: WebhookSender,
}

impl NotificationService {
    pub fn new(db: DatabaseConnection) -> Self {
        NotificationService {
            db,
            sender: WebhookSender::new(),
        }
    }

    pub async fn notify(&self, message: &str) {
        let config = match db_services::get_webhook_config(&self.db).await {
            Ok(Some(config)) => config,
            Ok(None) => return,
            Err(e) => {
                error!(error = %e, "failed to load webhook config");
                return;
            }
        };
        if !config.enabled || config.webhook_url.is_empty() {
            debug!("webhook disabled, skipping notification");
            return;
        }

        let payload = WebhookPayload {
            content: format!("{MESSAGE_PREFIX} {message}"),
            username: BOT_USERNAME.to_string(),
        };
        if let Err(e) = self.sender.send(&config.webhook_url, &payload).await {
            error!(error = %e, "failed to send webhook notification");
        }
    }
}
