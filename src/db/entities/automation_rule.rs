use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An inert automation rule. Rules are plain configuration records: they are
/// created, listed and deleted over the API but nothing executes them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "automation_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// "category_inactive" or "scheduled".
    pub rule_type: String,
    pub category: Option<String>,
    pub inactive_minutes: Option<i32>,
    pub schedule_time: Option<String>,
    pub enabled: bool,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
