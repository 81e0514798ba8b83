pub mod automation_routes;
pub mod server_routes;
pub mod webhook_routes;
