//! Server startup

use crate::io::error::{Result, TileError};
use crate::server::config::ServerConfig;
use crate::server::routes::create_router;
use tokio::net::TcpListener;

/// Bind the configured address
///
/// # Errors
///
/// Returns an error if the address cannot be bound
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let address = config.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| TileError::Server { address, source })
}

/// Serve the router on an already bound listener until the process stops
///
/// # Errors
///
/// Returns an error if the server loop fails
pub async fn serve(listener: TcpListener, config: &ServerConfig) -> Result<()> {
    let address = listener
        .local_addr()
        .map_or_else(|_| config.bind_address(), |addr| addr.to_string());

    if !config.shell.is_file() {
        tracing::warn!(
            shell = %config.shell.display(),
            "application shell not found, unmatched paths will 404"
        );
    }
    if !config.asset_dir.is_dir() {
        tracing::warn!(assets = %config.asset_dir.display(), "asset directory not found");
    }

    tracing::info!(%address, "serving editor");
    axum::serve(listener, create_router(config))
        .await
        .map_err(|source| TileError::Server { address, source })
}

/// Bind and serve on a fresh multi-threaded runtime
///
/// # Errors
///
/// Returns an error if the runtime cannot start, the address cannot be bound,
/// or the server loop fails
pub fn run(config: &ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().map_err(|source| TileError::Server {
        address: config.bind_address(),
        source,
    })?;
    runtime.block_on(async {
        let listener = bind(config).await?;
        serve(listener, config).await
    })
}
