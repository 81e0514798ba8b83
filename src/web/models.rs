use serde::{Deserialize, Serialize};

use crate::ptero::models::{AffectedServer, EnrichedServer, PowerAction, ResourceSnapshot};

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: i32,
    pub username: String,
}

// JWT claims carried by the access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub admin_id: i32,
    pub exp: usize,
}

/// Authenticated admin details, inserted as a request extension by the auth
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerListResponse {
    pub servers: Vec<EnrichedServer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerResources {
    pub server_id: String,
    pub name: String,
    pub resources: ResourceSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceListResponse {
    pub resources: Vec<ServerResources>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PowerActionRequest {
    pub action: PowerAction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PowerActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkActionRequest {
    pub action: PowerAction,
    #[serde(default)]
    pub category: Option<String>,
    pub filter_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkActionResponse {
    pub success: bool,
    pub affected: Vec<AffectedServer>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutomationRuleInput {
    pub name: String,
    pub rule_type: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub inactive_minutes: Option<i32>,
    #[serde(default)]
    pub schedule_time: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutomationRuleListResponse {
    pub rules: Vec<crate::db::entities::automation_rule::Model>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookConfigInput {
    pub webhook_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookConfigResponse {
    pub webhook_url: String,
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_request_parses_with_and_without_category() {
        let with: BulkActionRequest = serde_json::from_str(
            r#"{"action": "restart", "category": "SMP", "filter_type": "category"}"#,
        )
        .unwrap();
        assert_eq!(with.action, PowerAction::Restart);
        assert_eq!(with.category.as_deref(), Some("SMP"));

        let without: BulkActionRequest =
            serde_json::from_str(r#"{"action": "stop", "filter_type": "all"}"#).unwrap();
        assert!(without.category.is_none());
    }

    #[test]
    fn automation_input_defaults_enabled() {
        let input: AutomationRuleInput =
            serde_json::from_str(r#"{"name": "n", "rule_type": "scheduled"}"#).unwrap();
        assert!(input.enabled);
        assert!(input.category.is_none());
    }

    #[test]
    fn unknown_power_action_is_rejected() {
        let result: Result<PowerActionRequest, _> =
            serde_json::from_str(r#"{"action": "explode"}"#);
        assert!(result.is_err());
    }
}
