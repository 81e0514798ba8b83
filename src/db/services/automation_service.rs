use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::db::entities::automation_rule;

/// Creates a new automation rule with a generated id.
#[allow(clippy::too_many_arguments)]
pub async fn create_rule(
    db: &DatabaseConnection,
    name: &str,
    rule_type: &str,
    category: Option<&str>,
    inactive_minutes: Option<i32>,
    schedule_time: Option<&str>,
    enabled: bool,
) -> Result<automation_rule::Model, DbErr> {
    let rule = automation_rule::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name.to_owned()),
        rule_type: Set(rule_type.to_owned()),
        category: Set(category.map(|c| c.to_owned())),
        inactive_minutes: Set(inactive_minutes),
        schedule_time: Set(schedule_time.map(|s| s.to_owned())),
        enabled: Set(enabled),
        created_at: Set(Utc::now()),
    };
    rule.insert(db).await
}

/// Retrieves all automation rules.
pub async fn get_rules(db: &DatabaseConnection) -> Result<Vec<automation_rule::Model>, DbErr> {
    automation_rule::Entity::find().all(db).await
}

/// Deletes a rule by id. Returns the number of rows removed.
pub async fn delete_rule(db: &DatabaseConnection, rule_id: &str) -> Result<u64, DbErr> {
    let result = automation_rule::Entity::delete_by_id(rule_id.to_owned())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
