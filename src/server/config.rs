use std::env;

#[derive(Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub panel_url: String,
    pub panel_app_token: String,
    pub panel_client_token: String,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;

        let panel_url = env::var("PTERO_URL")
            .map_err(|_| "PTERO_URL must be set".to_string())?;

        // Empty tokens are tolerated: every panel call then degrades to its
        // documented fallback instead of failing startup.
        let panel_app_token = env::var("PTERO_APP_KEY").unwrap_or_default();
        let panel_client_token = env::var("PTERO_CLIENT_KEY").unwrap_or_default();

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(ServerConfig {
            listen_addr,
            database_url,
            jwt_secret,
            panel_url,
            panel_app_token,
            panel_client_token,
            cors_origins,
        })
    }
}
