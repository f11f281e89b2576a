//! barcat server - main entry point

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use barcat_catalog::CatalogStore;
use barcat_common::logging::{init_logging, LogConfig};
use barcat_server::{config::Config, routes, service::CocktailService};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over the baked-in directives
    let log_config = LogConfig::from_env().unwrap_or_else(|_| {
        LogConfig::new()
            .filter_directives("barcat_server=debug,barcat_catalog=debug,tower_http=debug")
    });
    init_logging(&log_config)?;

    info!("Starting barcat server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    // Creates the data directory and catalog file when missing, and probes
    // the snapshot endpoint; an unreachable endpoint fails startup.
    let store = CatalogStore::connect(
        config.catalog.file_path(),
        config.catalog.snapshot_url.clone(),
    )
    .await?;
    info!(path = %store.path().display(), "catalog store initialized");

    let service = CocktailService::new(store);
    let app = routes::router(service).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
