use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use std::sync::Arc;

use crate::db::entities::automation_rule;
use crate::db::services as db_services;
use crate::web::models::{
    AuthenticatedAdmin, AutomationRuleInput, AutomationRuleListResponse, DeleteResponse,
};
use crate::web::{AppState, error::AppError};

pub fn create_automation_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_rules).post(create_rule))
        .route("/{id}", delete(delete_rule))
}

async fn create_rule(
    State(app_state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Json(payload): Json<AutomationRuleInput>,
) -> Result<Json<automation_rule::Model>, AppError> {
    let rule = db_services::create_rule(
        &app_state.db,
        &payload.name,
        &payload.rule_type,
        payload.category.as_deref(),
        payload.inactive_minutes,
        payload.schedule_time.as_deref(),
        payload.enabled,
    )
    .await?;

    app_state
        .notifications
        .notify(&format!(
            "Automation rule '{}' created by {}",
            rule.name, admin.username
        ))
        .await;
    Ok(Json(rule))
}

async fn list_rules(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<AutomationRuleListResponse>, AppError> {
    let rules = db_services::get_rules(&app_state.db).await?;
    Ok(Json(AutomationRuleListResponse { rules }))
}

async fn delete_rule(
    State(app_state): State<Arc<AppState>>,
    Path(rule_id): Path<String>,
    Extension(admin): Extension<AuthenticatedAdmin>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = db_services::delete_rule(&app_state.db, &rule_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Rule not found".to_string()));
    }

    app_state
        .notifications
        .notify(&format!("Automation rule deleted by {}", admin.username))
        .await;
    Ok(Json(DeleteResponse { success: true }))
}
