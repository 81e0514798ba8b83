use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

use crate::db::services as db_services;
use crate::web::models::{WebhookConfigInput, WebhookConfigResponse};
use crate::web::{AppState, error::AppError};

pub fn create_webhook_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_config).post(set_config))
}

async fn get_config(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<WebhookConfigResponse>, AppError> {
    let response = match db_services::get_webhook_config(&app_state.db).await? {
        Some(config) => WebhookConfigResponse {
            webhook_url: config.webhook_url,
            enabled: config.enabled,
        },
        None => WebhookConfigResponse {
            webhook_url: String::new(),
            enabled: false,
        },
    };
    Ok(Json(response))
}

async fn set_config(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<WebhookConfigInput>,
) -> Result<Json<WebhookConfigResponse>, AppError> {
    let config =
        db_services::upsert_webhook_config(&app_state.db, &payload.webhook_url, payload.enabled)
            .await?;
    Ok(Json(WebhookConfigResponse {
        webhook_url: config.webhook_url,
        enabled: config.enabled,
    }))
}
