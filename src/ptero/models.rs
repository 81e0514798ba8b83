use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel category name for a failed nest/egg lookup. Never included in the
/// category sets returned to clients.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// One server as returned by the panel application API. Attributes the panel
/// returns beyond the ones we read are preserved and passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub attributes: ServerAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerAttributes {
    pub id: i64,
    pub identifier: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nest: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egg: Option<CategoryRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A nest or egg reference on a server record. The application API normally
/// returns a bare numeric id, but records with expanded relationships carry an
/// embedded object with a `name` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Embedded(EmbeddedCategory),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CategoryRef {
    pub fn id(&self) -> Option<i64> {
        match self {
            CategoryRef::Id(id) => Some(*id),
            CategoryRef::Embedded(embedded) => embedded.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(_) => None,
            CategoryRef::Embedded(embedded) => Some(embedded.name.as_str()),
        }
    }
}

/// A server record with the category names resolved from the panel attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedServer {
    #[serde(flatten)]
    pub server: ServerRecord,
    pub nest_name: String,
    pub egg_name: String,
}

/// Live resource usage for one server, from the panel client API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    #[serde(default)]
    pub current_state: String,
    #[serde(default)]
    pub cpu_absolute: f64,
    #[serde(default)]
    pub memory_bytes: u64,
    #[serde(default)]
    pub memory_limit_bytes: u64,
    #[serde(default)]
    pub disk_bytes: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ResourceSnapshot {
    /// Snapshot substituted when the live fetch fails. The memory limit is 1
    /// so downstream usage ratios never divide by zero.
    pub fn fallback() -> Self {
        ResourceSnapshot {
            current_state: "offline".to_string(),
            cpu_absolute: 0.0,
            memory_bytes: 0,
            memory_limit_bytes: 1,
            disk_bytes: 0,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self.current_state.as_str(), "offline" | "stopped")
    }
}

/// Power signals accepted by the panel client API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Start,
    Stop,
    Restart,
    Kill,
}

impl PowerAction {
    pub fn as_signal(self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::Stop => "stop",
            PowerAction::Restart => "restart",
            PowerAction::Kill => "kill",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_signal())
    }
}

/// A server a bulk action was successfully applied to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectedServer {
    pub id: String,
    pub name: String,
}

// Wire shapes for the panel endpoints we consume.

#[derive(Debug, Deserialize)]
pub struct ServerListPage {
    #[serde(default)]
    pub data: Vec<ServerRecord>,
    #[serde(default)]
    pub meta: ListMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination { total_pages: 1 }
    }
}

fn default_total_pages() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub attributes: NamedObject,
}

#[derive(Debug, Deserialize)]
pub struct NamedObject {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub attributes: ResourceSnapshot,
}
