use bcrypt::{DEFAULT_COST, hash};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::db::entities::{admin, automation_rule, webhook_config};
use crate::db::services;

/// Prepares the database for use: creates any missing tables and seeds the
/// default admin account.
pub async fn init(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_tables(db).await?;
    seed_default_admin(db).await?;
    Ok(())
}

/// Creates the schema for all entities, skipping tables that already exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(admin::Entity),
        schema.create_table_from_entity(automation_rule::Entity),
        schema.create_table_from_entity(webhook_config::Entity),
    ];
    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(backend.build(&*statement)).await?;
    }
    Ok(())
}

/// Seeds the default `admin` account when none exists yet.
pub async fn seed_default_admin(db: &DatabaseConnection) -> Result<(), DbErr> {
    if services::get_admin_by_username(db, "admin").await?.is_some() {
        return Ok(());
    }

    let password_hash = hash("admin123", DEFAULT_COST)
        .map_err(|e| DbErr::Custom(format!("failed to hash default admin password: {e}")))?;
    services::create_admin(db, "admin", &password_hash).await?;
    info!("Default admin created: username=admin, password=admin123");
    Ok(())
}
