use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Singleton notification webhook configuration. All writes target the fixed
/// primary key [`SINGLETON_ID`], so the table never holds more than one row.
pub const SINGLETON_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "webhook_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(skip_serializing)]
    pub id: i32,
    pub webhook_url: String,
    pub enabled: bool,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
