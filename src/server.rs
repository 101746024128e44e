// ABOUTME: HTTP server assembly: routers, static uploads, CORS, tracing and body limits
// ABOUTME: Serves the application until ctrl-c or SIGTERM, then drains and closes the pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::auth::LEGACY_TOKEN_HEADER;
use crate::config::{ServerConfig, UploadConfig};
use crate::constants::UPLOADS_ROUTE;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, HostRoutes, PerformerRoutes};

/// Headroom for text fields and multipart framing on top of file payloads
const BODY_LIMIT_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the complete application router
pub fn build_router(resources: &ServerResources) -> Router {
    let config = &resources.config;

    Router::new()
        .merge(HealthRoutes::router(resources))
        .merge(HostRoutes::router(resources))
        .merge(PerformerRoutes::router(resources))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.uploads.dir))
        .layer(DefaultBodyLimit::max(request_body_limit(&config.uploads)))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Largest accepted request body: a full gallery field plus a profile picture
#[must_use]
pub fn request_body_limit(uploads: &UploadConfig) -> usize {
    uploads
        .max_file_bytes
        .saturating_mul(uploads.max_files_per_field.saturating_add(1))
        .saturating_add(BODY_LIMIT_OVERHEAD_BYTES)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(LEGACY_TOKEN_HEADER),
        ]);

    if config.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| warn!(%origin, error = %e, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Bind the configured port and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(resources: ServerResources) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    let router = build_router(&resources);
    info!(
        %addr,
        environment = %resources.config.environment,
        public_base_url = %resources.config.public_base_url,
        "Gigs backend listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    resources.database.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
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
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
