//! HTTP routes: tile assets, the demo API and the application shell

use crate::server::config::ServerConfig;
use axum::{Json, Router, extract::Path, routing::get};
use serde::Serialize;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Body returned by the demo API
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HelloResponse {
    /// Greeting text
    pub message: String,
    /// HTTP method that was answered, when relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Build the application router
///
/// `/assets/*` is served from the asset directory and answers 404 for missing
/// files. Any path no other route claims gets the application shell.
pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/hello", get(hello_get).put(hello_put))
        .route("/api/hello/:name", get(hello_name))
        .nest_service("/assets", ServeDir::new(&config.asset_dir))
        .fallback_service(ServeFile::new(&config.shell))
        .layer(TraceLayer::new_for_http())
}

async fn hello_get() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello, world!".to_string(),
        method: Some("GET".to_string()),
    })
}

async fn hello_put() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello, world!".to_string(),
        method: Some("PUT".to_string()),
    })
}

async fn hello_name(Path(name): Path<String>) -> Json<HelloResponse> {
    Json(HelloResponse {
        message: format!("Hello, {name}!"),
        method: None,
    })
}
