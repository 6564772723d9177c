//! Static content server for the editor shell and tile assets

/// Server startup
pub mod app;
/// Bind address and served paths
pub mod config;
/// Router and handlers
pub mod routes;

pub use config::ServerConfig;
pub use routes::create_router;
