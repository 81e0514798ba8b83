use axum::{
    Json, Router,
    extract::State,
    http::Method,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::notifications::NotificationService;
use crate::ptero::PanelClient;
use crate::server::config::ServerConfig;
use crate::services::auth_service;
use crate::web::{error::AppError, middleware::auth, models::LoginRequest, routes::*};

pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub panel: Arc<PanelClient>,
    pub notifications: Arc<NotificationService>,
    pub config: Arc<ServerConfig>,
}

async fn login_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.clone();
    let token_response =
        auth_service::login_admin(&app_state.db, payload, &app_state.config.jwt_secret).await?;

    app_state
        .notifications
        .notify(&format!("Admin '{username}' logged in"))
        .await;

    let auth_cookie = Cookie::build(("token", token_response.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let cookie_value = auth_cookie
        .to_string()
        .parse()
        .map_err(|e| AppError::InternalServerError(format!("Invalid cookie value: {e}")))?;

    let mut response = Json(token_response).into_response();
    response
        .headers_mut()
        .insert(axum::http::header::SET_COOKIE, cookie_value);
    Ok(response)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);
    if config.cors_origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn create_axum_router(
    db: DatabaseConnection,
    panel: Arc<PanelClient>,
    notifications: Arc<NotificationService>,
    config: Arc<ServerConfig>,
) -> Router {
    let cors = cors_layer(&config);
    let app_state = Arc::new(AppState {
        db,
        panel,
        notifications,
        config,
    });

    Router::new()
        .route("/api/health", get(health_check_handler))
        .route("/api/auth/login", post(login_handler))
        .route(
            "/api/auth/me",
            get(auth_service::me).route_layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth::auth,
            )),
        )
        .nest(
            "/api/servers",
            server_routes::create_server_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .route(
            "/api/categories",
            get(server_routes::list_categories).route_layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth::auth,
            )),
        )
        .nest(
            "/api/automation",
            automation_routes::create_automation_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .nest(
            "/api/webhook",
            webhook_routes::create_webhook_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .with_state(app_state)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router(panel_url: &str) -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        crate::db::setup::init(&db).await.unwrap();

        let config = Arc::new(ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            panel_url: panel_url.to_string(),
            panel_app_token: "app".to_string(),
            panel_client_token: "client".to_string(),
            cors_origins: vec!["*".to_string()],
        });
        let panel = Arc::new(PanelClient::new(panel_url, "app", "client"));
        let notifications = Arc::new(NotificationService::new(db.clone()));
        create_axum_router(db, panel, notifications, config)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn login(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({ "username": "admin", "password": "admin123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_endpoint_is_public() {
        let router = test_router("http://127.0.0.1:1").await;
        let response = router
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let router = test_router("http://127.0.0.1:1").await;
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({ "username": "admin", "password": "nope" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let router = test_router("http://127.0.0.1:1").await;
        let response = router
            .oneshot(Request::get("/api/servers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unreachable_panel_yields_empty_lists_not_errors() {
        let router = test_router("http://127.0.0.1:1").await;
        let token = login(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/servers")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "servers": [] }));

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/categories")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "categories": [] }));
    }

    #[tokio::test]
    async fn me_returns_the_authenticated_admin() {
        let router = test_router("http://127.0.0.1:1").await;
        let token = login(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["username"], "admin");
    }

    #[tokio::test]
    async fn webhook_config_round_trips() {
        let router = test_router("http://127.0.0.1:1").await;
        let token = login(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/webhook")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "webhook_url": "", "enabled": false })
        );

        let mut request = json_request(
            "POST",
            "/api/webhook",
            json!({ "webhook_url": "https://hooks.example/x", "enabled": true }),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "webhook_url": "https://hooks.example/x", "enabled": true })
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_automation_rule_is_404() {
        let router = test_router("http://127.0.0.1:1").await;
        let token = login(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::delete("/api/automation/no-such-id")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
