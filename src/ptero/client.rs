use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use super::models::{
    DetailResponse, PowerAction, ResourceSnapshot, ServerListPage, ServerRecord, StatsResponse,
    UNKNOWN_CATEGORY,
};

const PAGE_SIZE: u32 = 100;
const LIST_TIMEOUT: Duration = Duration::from_secs(15);
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("panel returned status {0}")]
    Status(StatusCode),
}

/// HTTP client for the panel's application API (fleet inventory, nest/egg
/// taxonomy) and client API (live resources, power control).
///
/// Every public method collapses upstream failures to a documented default;
/// only the internal helpers surface [`PanelError`].
pub struct PanelClient {
    http: Client,
    base_url: String,
    app_token: String,
    client_token: String,
}

impl PanelClient {
    pub fn new(base_url: &str, app_token: &str, client_token: &str) -> Self {
        PanelClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_token: app_token.to_string(),
            client_token: client_token.to_string(),
        }
    }

    /// Fetches the whole fleet, 100 servers per page, until the page count the
    /// panel reports is exhausted. Any page failure discards the pages already
    /// fetched and yields an empty list.
    pub async fn fetch_all_servers(&self) -> Vec<ServerRecord> {
        match self.try_fetch_all_servers().await {
            Ok(servers) => {
                info!(count = servers.len(), "fetched server list from panel");
                servers
            }
            Err(e) => {
                error!(error = %e, "failed to fetch servers");
                Vec::new()
            }
        }
    }

    async fn try_fetch_all_servers(&self) -> Result<Vec<ServerRecord>, PanelError> {
        let mut all_servers = Vec::new();
        let mut page = 1u32;
        loop {
            let listing = self.fetch_server_page(page).await?;
            let total_pages = listing.meta.pagination.total_pages;
            all_servers.extend(listing.data);
            if page >= total_pages {
                break;
            }
            page += 1;
        }
        Ok(all_servers)
    }

    async fn fetch_server_page(&self, page: u32) -> Result<ServerListPage, PanelError> {
        let response = self
            .http
            .get(format!("{}/api/application/servers", self.base_url))
            .query(&[("page", page), ("per_page", PAGE_SIZE)])
            .bearer_auth(&self.app_token)
            .header(header::ACCEPT, "application/json")
            .timeout(LIST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PanelError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Resolves a nest id to its display name, or "Unknown" on any failure.
    pub async fn fetch_nest_name(&self, nest_id: i64) -> String {
        let path = format!("api/application/nests/{nest_id}");
        match self.fetch_named_detail(&path).await {
            Ok(name) => name,
            Err(e) => {
                warn!(nest_id, error = %e, "failed to fetch nest");
                UNKNOWN_CATEGORY.to_string()
            }
        }
    }

    /// Resolves an egg to its display name, or "Unknown" on any failure.
    pub async fn fetch_egg_name(&self, nest_id: i64, egg_id: i64) -> String {
        let path = format!("api/application/nests/{nest_id}/eggs/{egg_id}");
        match self.fetch_named_detail(&path).await {
            Ok(name) => name,
            Err(e) => {
                warn!(nest_id, egg_id, error = %e, "failed to fetch egg");
                UNKNOWN_CATEGORY.to_string()
            }
        }
    }

    async fn fetch_named_detail(&self, path: &str) -> Result<String, PanelError> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .bearer_auth(&self.app_token)
            .header(header::ACCEPT, "application/json")
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PanelError::Status(response.status()));
        }
        let detail: DetailResponse = response.json().await?;
        Ok(detail.attributes.name)
    }

    /// Fetches a server's live resource usage via the client API. A failed
    /// fetch substitutes the offline fallback snapshot.
    pub async fn fetch_resources(&self, identifier: &str) -> ResourceSnapshot {
        match self.try_fetch_resources(identifier).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(server = identifier, error = %e, "failed to fetch resources");
                ResourceSnapshot::fallback()
            }
        }
    }

    async fn try_fetch_resources(&self, identifier: &str) -> Result<ResourceSnapshot, PanelError> {
        let response = self
            .http
            .get(format!(
                "{}/api/client/servers/{identifier}/resources",
                self.base_url
            ))
            .bearer_auth(&self.client_token)
            .header(header::ACCEPT, "application/json")
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PanelError::Status(response.status()));
        }
        let stats: StatsResponse = response.json().await?;
        Ok(stats.attributes)
    }

    /// Sends a power signal to one server. Returns whether the panel accepted
    /// the command; failures are logged, never propagated.
    pub async fn send_power_action(&self, identifier: &str, action: PowerAction) -> bool {
        let result = self
            .http
            .post(format!(
                "{}/api/client/servers/{identifier}/power",
                self.base_url
            ))
            .bearer_auth(&self.client_token)
            .header(header::ACCEPT, "application/json")
            .json(&json!({ "signal": action.as_signal() }))
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                error!(server = identifier, %action, status = %response.status(), "panel rejected power action");
                false
            }
            Err(e) => {
                error!(server = identifier, %action, error = %e, "failed to send power action");
                false
            }
        }
    }
}
