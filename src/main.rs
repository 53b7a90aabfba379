use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use adventure_notify::config::Settings;
use adventure_notify::metrics::encode_metrics;
use adventure_notify::notification::{NotificationSink, TracingSink};
use adventure_notify::server::{notices, GameServer};
use adventure_notify::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    init_tracing(&settings.logging);
    tracing::info!("Configuration loaded");

    let sink: Arc<dyn NotificationSink> = Arc::new(TracingSink);
    let server = GameServer::bind(settings, sink.clone()).await?;
    let addr = server.local_addr()?;

    // Announce the server on the application tile
    notices::welcome_tile(server.state().templates.as_ref(), &addr.to_string())?
        .with_notifications()
        .set(sink.as_ref())?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal_handler(shutdown.clone()));

    server.run(shutdown).await?;

    match encode_metrics() {
        Ok(metrics) => tracing::debug!(metrics = %metrics, "Final metrics"),
        Err(e) => tracing::warn!(error = %e, "Failed to encode metrics"),
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal_handler(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }

    shutdown.cancel();
}
