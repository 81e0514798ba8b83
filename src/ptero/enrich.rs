use std::collections::{BTreeSet, HashMap};

use super::client::PanelClient;
use super::models::{
    AffectedServer, CategoryRef, EnrichedServer, PowerAction, ServerRecord, UNKNOWN_CATEGORY,
};

/// Request-scoped memo for nest/egg name lookups. Owned by one enrichment
/// pass and dropped with it, so no synchronization is needed. Failed lookups
/// cache the "Unknown" sentinel too: repeated failures for the same id cost
/// exactly one remote call per pass.
#[derive(Default)]
pub struct MetadataCache {
    nests: HashMap<i64, String>,
    eggs: HashMap<(i64, i64), String>,
}

impl MetadataCache {
    pub async fn nest_name(&mut self, panel: &PanelClient, nest_id: i64) -> String {
        if !self.nests.contains_key(&nest_id) {
            let name = panel.fetch_nest_name(nest_id).await;
            self.nests.insert(nest_id, name);
        }
        self.nests[&nest_id].clone()
    }

    pub async fn egg_name(&mut self, panel: &PanelClient, nest_id: i64, egg_id: i64) -> String {
        let key = (nest_id, egg_id);
        if !self.eggs.contains_key(&key) {
            let name = panel.fetch_egg_name(nest_id, egg_id).await;
            self.eggs.insert(key, name);
        }
        self.eggs[&key].clone()
    }
}

fn nest_id(server: &ServerRecord) -> Option<i64> {
    server.attributes.nest.as_ref().and_then(CategoryRef::id)
}

fn egg_id(server: &ServerRecord) -> Option<i64> {
    server.attributes.egg.as_ref().and_then(CategoryRef::id)
}

/// Attaches resolved nest/egg names to every record, preserving input order.
/// Lookups go through a cache scoped to this single pass.
pub async fn enrich_servers(panel: &PanelClient, servers: Vec<ServerRecord>) -> Vec<EnrichedServer> {
    let mut cache = MetadataCache::default();
    let mut enriched = Vec::with_capacity(servers.len());
    for server in servers {
        let nest = nest_id(&server);
        let egg = egg_id(&server);
        let nest_name = match nest {
            Some(id) => cache.nest_name(panel, id).await,
            None => UNKNOWN_CATEGORY.to_string(),
        };
        let egg_name = match (nest, egg) {
            (Some(nest), Some(egg)) => cache.egg_name(panel, nest, egg).await,
            _ => UNKNOWN_CATEGORY.to_string(),
        };
        enriched.push(EnrichedServer {
            server,
            nest_name,
            egg_name,
        });
    }
    enriched
}

/// Collects the distinct nest-level and egg-level category names across the
/// fleet, excluding the "Unknown" sentinel, sorted ascending.
pub async fn list_categories(panel: &PanelClient, servers: &[ServerRecord]) -> Vec<String> {
    let mut cache = MetadataCache::default();
    let mut categories = BTreeSet::new();
    for server in servers {
        let nest = nest_id(server);
        let egg = egg_id(server);
        if let Some(id) = nest {
            categories.insert(cache.nest_name(panel, id).await);
        }
        if let (Some(nest), Some(egg)) = (nest, egg) {
            categories.insert(cache.egg_name(panel, nest, egg).await);
        }
    }
    categories.remove(UNKNOWN_CATEGORY);
    categories.into_iter().collect()
}

/// Which servers a bulk action applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkFilter {
    All,
    Category(String),
    Inactive,
}

impl BulkFilter {
    /// Builds a filter from the request fields. Returns `None` for an
    /// unrecognized filter type, or a category filter without a category —
    /// those match no servers at all.
    pub fn parse(filter_type: &str, category: Option<&str>) -> Option<BulkFilter> {
        match filter_type {
            "all" => Some(BulkFilter::All),
            "category" => match category {
                Some(c) if !c.is_empty() => Some(BulkFilter::Category(c.to_string())),
                _ => None,
            },
            "inactive" => Some(BulkFilter::Inactive),
            _ => None,
        }
    }
}

/// The category label used by the bulk "category" filter: the egg name when
/// the raw record embeds one, else the nest name, else empty. A server with
/// no resolvable label never matches.
fn category_label(server: &ServerRecord) -> &str {
    server
        .attributes
        .egg
        .as_ref()
        .and_then(CategoryRef::name)
        .or_else(|| server.attributes.nest.as_ref().and_then(CategoryRef::name))
        .unwrap_or("")
}

async fn filter_matches(panel: &PanelClient, filter: &BulkFilter, server: &ServerRecord) -> bool {
    match filter {
        BulkFilter::All => true,
        BulkFilter::Category(category) => {
            let label = category_label(server);
            !label.is_empty() && label.to_lowercase().contains(&category.to_lowercase())
        }
        BulkFilter::Inactive => {
            panel
                .fetch_resources(&server.attributes.identifier)
                .await
                .is_inactive()
        }
    }
}

/// Applies `action` to every server matching `filter`, sequentially, and
/// returns the servers the panel accepted the command for. Rejected commands
/// are skipped, not retried.
pub async fn bulk_action(
    panel: &PanelClient,
    servers: &[ServerRecord],
    filter: &BulkFilter,
    action: PowerAction,
) -> Vec<AffectedServer> {
    let mut affected = Vec::new();
    for server in servers {
        if !filter_matches(panel, filter, server).await {
            continue;
        }
        if panel
            .send_power_action(&server.attributes.identifier, action)
            .await
        {
            affected.push(AffectedServer {
                id: server.attributes.identifier.clone(),
                name: server.attributes.name.clone(),
            });
        }
    }
    affected
}
