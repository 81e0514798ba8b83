//! The `services` module provides a high-level API for interacting with the
//! database. It encapsulates the query logic so the HTTP handlers can work
//! with domain models without knowing about the underlying schema.
//!
//! All public functions from the sub-modules are re-exported here for
//! convenient access under the `crate::db::services::` path.

pub mod admin_service;
pub mod automation_service;
pub mod webhook_service;

pub use admin_service::*;
pub use automation_service::*;
pub use webhook_service::*;
