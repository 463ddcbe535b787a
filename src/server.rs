// ABOUTME: HTTP server bootstrap: router composition, listener binding, graceful shutdown
// ABOUTME: Closes every open stream session once the listener stops accepting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server bootstrap

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, VitalsRoutes};

/// How long shutdown waits for sessions to finish tearing down
const SESSION_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Compose every route with the CORS and trace layers
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(VitalsRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = bind_address(&resources.config);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("PulseCare vitals server listening on http://{}", addr);
    serve_on(listener, resources, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves
///
/// Open streams would otherwise hold graceful shutdown forever, so every
/// session is closed as soon as the signal fires.
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve_on<F>(
    listener: TcpListener,
    resources: Arc<ServerResources>,
    shutdown: F,
) -> AppResult<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let sessions = resources.sessions.clone();
    let app = build_router(resources);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown signal received, closing stream sessions");
            sessions.close_all().await;
            if tokio::time::timeout(SESSION_DRAIN_TIMEOUT, sessions.wait_idle(Duration::from_millis(50)))
                .await
                .is_err()
            {
                warn!("Stream sessions still open after {:?}", SESSION_DRAIN_TIMEOUT);
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

fn bind_address(config: &ServerConfig) -> String {
    format!("{}:{}", config.host, config.http_port)
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
