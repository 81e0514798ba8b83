use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::db::entities::admin;

/// Retrieves an admin by username.
pub async fn get_admin_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<admin::Model>, DbErr> {
    admin::Entity::find()
        .filter(admin::Column::Username.eq(username))
        .one(db)
        .await
}

/// Creates a new admin with an already-hashed password.
pub async fn create_admin(
    db: &DatabaseConnection,
    username: &str,
    password_hash: &str,
) -> Result<admin::Model, DbErr> {
    let new_admin = admin::ActiveModel {
        username: Set(username.to_owned()),
        password_hash: Set(password_hash.to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    new_admin.insert(db).await
}
