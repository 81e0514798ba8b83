use std::sync::Arc;

use sea_orm::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pteroman::db;
use pteroman::notifications::NotificationService;
use pteroman::ptero::PanelClient;
use pteroman::server::config::ServerConfig;
use pteroman::web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Arc::new(ServerConfig::from_env()?);

    let db = Database::connect(&config.database_url).await?;
    db::setup::init(&db).await?;

    let panel = Arc::new(PanelClient::new(
        &config.panel_url,
        &config.panel_app_token,
        &config.panel_client_token,
    ));
    let notifications = Arc::new(NotificationService::new(db.clone()));

    let router = web::create_axum_router(db, panel, notifications, config.clone());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "pteroman backend listening");
    axum::serve(listener, router).await?;

    Ok(())
}
