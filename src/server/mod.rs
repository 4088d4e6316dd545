//! HTTP server: configuration, routing, handlers, and API error mapping.

mod error;
mod handlers;
mod payload;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;

use tracing::info;

/// Server configuration, read from the environment with defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "dataset preprocessing service listening");

    axum::serve(listener, create_router()).await?;
    Ok(())
}
