use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, Set};

use crate::db::entities::webhook_config::{self, SINGLETON_ID};

/// Retrieves the webhook configuration, if one has been saved.
pub async fn get_webhook_config(
    db: &DatabaseConnection,
) -> Result<Option<webhook_config::Model>, DbErr> {
    webhook_config::Entity::find_by_id(SINGLETON_ID).one(db).await
}

/// Replaces the webhook configuration. The write is an upsert on the fixed
/// singleton key, so the table holds at most one row.
pub async fn upsert_webhook_config(
    db: &DatabaseConnection,
    webhook_url: &str,
    enabled: bool,
) -> Result<webhook_config::Model, DbErr> {
    let now = Utc::now();
    match webhook_config::Entity::find_by_id(SINGLETON_ID).one(db).await? {
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.webhook_url = Set(webhook_url.to_owned());
            active.enabled = Set(enabled);
            active.updated_at = Set(now);
            active.update(db).await
        }
        None => {
            let config = webhook_config::ActiveModel {
                id: Set(SINGLETON_ID),
                webhook_url: Set(webhook_url.to_owned()),
                enabled: Set(enabled),
                updated_at: Set(now),
            };
            config.insert(db).await
        }
    }
}
