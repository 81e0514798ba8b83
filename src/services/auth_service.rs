use axum::Extension;
use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::db::entities::admin;
use crate::db::services as db_services;
use crate::web::error::AppError;
use crate::web::models::{AdminResponse, AuthenticatedAdmin, Claims, LoginRequest, TokenResponse};
use sea_orm::DatabaseConnection;

// Token lifetime matches the panel session length expected by the frontend.
const TOKEN_LIFETIME_HOURS: i64 = 8;

pub async fn login_admin(
    db: &DatabaseConnection,
    req: LoginRequest,
    jwt_secret: &str,
) -> Result<TokenResponse, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password must not be empty.".to_string(),
        ));
    }

    let admin = db_services::get_admin_by_username(db, &req.username)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up admin: {e}")))?
        .ok_or(AppError::InvalidCredentials)?;

    let valid_password = verify(&req.password, &admin.password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {e}")))?;
    if !valid_password {
        return Err(AppError::InvalidCredentials);
    }

    create_jwt_for_admin(&admin, jwt_secret)
}

pub fn create_jwt_for_admin(
    admin: &admin::Model,
    jwt_secret: &str,
) -> Result<TokenResponse, AppError> {
    let expiration = (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: admin.username.clone(),
        admin_id: admin.id,
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::TokenCreationError(format!("Failed to create token: {e}")))?;

    Ok(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    })
}

pub async fn me(
    Extension(admin): Extension<AuthenticatedAdmin>,
) -> Result<axum::Json<AdminResponse>, AppError> {
    Ok(axum::Json(AdminResponse {
        id: admin.id,
        username: admin.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{services, setup};
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use sea_orm::Database;

    async fn db_with_admin(username: &str, password: &str) -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        setup::create_tables(&db).await.unwrap();
        let hash = bcrypt::hash(password, 4).unwrap();
        services::create_admin(&db, username, &hash).await.unwrap();
        db
    }

    #[tokio::test]
    async fn login_issues_decodable_token() {
        let db = db_with_admin("admin", "hunter22").await;
        let response = login_admin(
            &db,
            LoginRequest {
                username: "admin".to_string(),
                password: "hunter22".to_string(),
            },
            "secret",
        )
        .await
        .unwrap();

        assert_eq!(response.token_type, "bearer");
        let data = decode::<Claims>(
            &response.access_token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "admin");
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let db = db_with_admin("admin", "hunter22").await;
        let result = login_admin(
            &db,
            LoginRequest {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            },
            "secret",
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_user_is_invalid_credentials() {
        let db = db_with_admin("admin", "hunter22").await;
        let result = login_admin(
            &db,
            LoginRequest {
                username: "ghost".to_string(),
                password: "hunter22".to_string(),
            },
            "secret",
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected_before_lookup() {
        let db = db_with_admin("admin", "hunter22").await;
        let result = login_admin(
            &db,
            LoginRequest {
                username: String::new(),
                password: String::new(),
            },
            "secret",
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
