//! Service entry point: logging, configuration, serve.

use dataset_prep_api::server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dataset_prep_api=info,tower_http=info".into()),
        )
        .init();

    run_server(ServerConfig::default()).await
}
