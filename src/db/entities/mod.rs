//! SeaORM entities backing the persisted collections: admin credentials,
//! automation rules and the singleton webhook configuration.

pub mod admin;
pub mod automation_rule;
pub mod webhook_config;

pub mod prelude {
    pub use super::admin::Entity as Admin;
    pub use super::admin::Model as AdminModel;
    pub use super::admin::ActiveModel as AdminActiveModel;
    pub use super::admin::Column as AdminColumn;

    pub use super::automation_rule::Entity as AutomationRule;
    pub use super::automation_rule::Model as AutomationRuleModel;
    pub use super::automation_rule::ActiveModel as AutomationRuleActiveModel;
    pub use super::automation_rule::Column as AutomationRuleColumn;

    pub use super::webhook_config::Entity as WebhookConfig;
    pub use super::webhook_config::Model as WebhookConfigModel;
    pub use super::webhook_config::ActiveModel as WebhookConfigActiveModel;
    pub use super::webhook_config::Column as WebhookConfigColumn;
}
