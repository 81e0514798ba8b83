use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use std::sync::Arc;

use crate::ptero::enrich;
use crate::web::models::{
    AuthenticatedAdmin, BulkActionRequest, BulkActionResponse, CategoryListResponse,
    PowerActionRequest, PowerActionResponse, ResourceListResponse, ServerListResponse,
    ServerResources,
};
use crate::web::{AppState, error::AppError};

pub fn create_server_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_servers))
        .route("/resources", get(list_resources))
        .route("/{id}/power", post(power_action))
        .route("/bulk-action", post(bulk_action))
}

/// The whole fleet, with nest/egg category names attached. An unreachable
/// panel yields an empty list, not an error.
async fn list_servers(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ServerListResponse>, AppError> {
    let servers = app_state.panel.fetch_all_servers().await;
    let enriched = enrich::enrich_servers(&app_state.panel, servers).await;
    Ok(Json(ServerListResponse { servers: enriched }))
}

/// Live resource usage for every server, one sequential client-API call per
/// server. Failed fetches degrade to the offline fallback snapshot.
async fn list_resources(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ResourceListResponse>, AppError> {
    let servers = app_state.panel.fetch_all_servers().await;
    let mut resources = Vec::with_capacity(servers.len());
    for server in &servers {
        let snapshot = app_state
            .panel
            .fetch_resources(&server.attributes.identifier)
            .await;
        resources.push(ServerResources {
            server_id: server.attributes.identifier.clone(),
            name: server.attributes.name.clone(),
            resources: snapshot,
        });
    }
    Ok(Json(ResourceListResponse { resources }))
}

async fn power_action(
    State(app_state): State<Arc<AppState>>,
    Path(server_id): Path<String>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Json(payload): Json<PowerActionRequest>,
) -> Result<Json<PowerActionResponse>, AppError> {
    let success = app_state
        .panel
        .send_power_action(&server_id, payload.action)
        .await;
    if !success {
        return Err(AppError::UpstreamFailure(
            "Failed to control server".to_string(),
        ));
    }

    app_state
        .notifications
        .notify(&format!(
            "Server {server_id} - Action: {} by {}",
            payload.action, admin.username
        ))
        .await;
    Ok(Json(PowerActionResponse {
        success: true,
        message: format!("Action {} sent to server", payload.action),
    }))
}

async fn bulk_action(
    State(app_state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Json(payload): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, AppError> {
    let affected = match enrich::BulkFilter::parse(&payload.filter_type, payload.category.as_deref())
    {
        Some(filter) => {
            let servers = app_state.panel.fetch_all_servers().await;
            enrich::bulk_action(&app_state.panel, &servers, &filter, payload.action).await
        }
        // an unrecognized filter, or a category filter without a category,
        // matches nothing
        None => Vec::new(),
    };

    app_state
        .notifications
        .notify(&format!(
            "Bulk action {} executed on {} servers by {}",
            payload.action,
            affected.len(),
            admin.username
        ))
        .await;
    let count = affected.len();
    Ok(Json(BulkActionResponse {
        success: true,
        affected,
        count,
    }))
}

/// Distinct category names across the fleet, mounted at `/api/categories`.
pub async fn list_categories(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let servers = app_state.panel.fetch_all_servers().await;
    let categories = enrich::list_categories(&app_state.panel, &servers).await;
    Ok(Json(CategoryListResponse { categories }))
}
