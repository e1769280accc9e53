//! govgate gateway binary.
//!
//! - Strict YAML config from `GOVGATE_CONFIG` (default `govgate.yaml`)
//! - `POST /v1/evaluate`, `/healthz`, `/readyz`, `/metrics`
//! - Graceful shutdown on Ctrl-C / SIGTERM (readiness flips to draining)

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use govgate_core::error::{GovError, Result};
use govgate_gateway::{app_state::AppState, config, config::LogFormat, router};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load_from_file(&config::config_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match cfg.logging.format {
        LogFormat::Text => fmt().with_env_filter(filter).init(),
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
    }

    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| GovError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}")))?;

    let state = AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "govgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| GovError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| GovError::Internal(format!("server failed: {e}")))?;

    tracing::info!("govgate-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state.set_draining();
    tracing::info!("shutdown signal received; draining");
}
