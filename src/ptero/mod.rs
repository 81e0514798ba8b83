//! Client-side integration with the Pterodactyl panel: wire models, the HTTP
//! client for the application/client APIs, and the enrichment and bulk-action
//! logic built on top of it.

pub mod client;
pub mod enrich;
pub mod models;

pub use client::PanelClient;
