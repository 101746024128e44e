// ABOUTME: Health check and root banner endpoints
// ABOUTME: Reports service name, version and database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{messages::ROOT_BANNER, SERVICE_NAME};
use crate::resources::ServerResources;

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Whether the database answered a trivial query
    pub database: bool,
}

/// Health routes configuration
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health router
    ///
    /// # Endpoints
    ///
    /// - `GET /` - Plain-text banner
    /// - `GET /health` - Service and database status
    pub fn router(resources: &ServerResources) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .with_state(Arc::new(resources.clone()))
    }

    async fn handle_root() -> &'static str {
        ROOT_BANNER
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> impl IntoResponse {
        let database = match sqlx::query("SELECT 1")
            .execute(resources.database.pool())
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "health check database query failed");
                false
            }
        };

        let status = if database {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        let body = HealthResponse {
            status: if database { "ok" } else { "degraded" }.to_owned(),
            service: SERVICE_NAME.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            database,
        };
        (status, Json(body))
    }
}
