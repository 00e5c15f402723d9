//! Transit Skill HTTP Server
//!
//! Main entry point for the long-running skill endpoint.

use std::{sync::Arc, time::Duration};

use infrastructure::{AppConfig, build_skill_service, init_telemetry};
use presentation_http::{create_app, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_telemetry(&config.telemetry)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Transit skill server starting"
    );

    let service = build_skill_service(&config)?;
    let state = AppState::new(Arc::new(service));
    let app = create_app(state, config.server.max_body_size_json_bytes);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Server listening");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
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
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    info!(?timeout, "Waiting for in-flight requests to finish");

    // Force exit if draining takes longer than the configured timeout
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::warn!("Graceful shutdown timed out, exiting");
        std::process::exit(1);
    });
}
