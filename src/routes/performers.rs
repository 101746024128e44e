// ABOUTME: Route handlers for performer profile endpoints
// ABOUTME: Authenticated fetch and upsert of the caller's profile plus the public listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::{MessageResponse, ProfileListResponse, ProfileResponse};
use crate::constants::messages;
use crate::errors::AppError;
use crate::forms::multipart::{discard_uploads, extract_profile_form};
use crate::profiles::{PerformerProfileUpdate, UpsertOutcome};
use crate::resources::ServerResources;

/// Performer profile routes configuration
pub struct PerformerRoutes;

impl PerformerRoutes {
    /// Create the performer profile router
    ///
    /// # Endpoints
    ///
    /// - `GET /api/performers` - Public listing of every saved performer profile
    /// - `GET /api/performers/profile` - Fetch the caller's performer profile
    /// - `PUT /api/performers/profile` - Create or update it (multipart or JSON)
    /// - `POST /api/performers/profile` - Same as `PUT`
    pub fn router(resources: &ServerResources) -> Router {
        Router::new()
            .route("/api/performers", get(Self::handle_list_profiles))
            .route(
                "/api/performers/profile",
                get(Self::handle_get_profile)
                    .put(Self::handle_upsert_profile)
                    .post(Self::handle_upsert_profile),
            )
            .with_state(Arc::new(resources.clone()))
    }

    /// Handle GET /api/performers
    async fn handle_list_profiles(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let profiles = resources.performer_profiles.list_all().await?;
        debug!(count = profiles.len(), "listed performer profiles");

        let body = ProfileListResponse {
            message: messages::PERFORMERS_LISTED.to_owned(),
            profiles,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle GET /api/performers/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let lookup = resources.performer_profiles.fetch(auth.user_id).await?;

        let message = if lookup.is_default {
            messages::PERFORMER_DEFAULT
        } else {
            messages::PERFORMER_FETCHED
        };
        let body = ProfileResponse {
            message: message.to_owned(),
            profile: lookup.profile,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle PUT|POST /api/performers/profile
    async fn handle_upsert_profile(
        State(resources): State<Arc<ServerResources>>,
        request: Request,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(request.headers())?;
        let store = resources.upload_store.as_ref();
        let form =
            extract_profile_form(request, store, PerformerProfileUpdate::FILE_FIELDS).await?;

        let outcome = match resources.performer_profiles.upsert(auth.user_id, &form).await {
            Ok(outcome) => outcome,
            Err(e) => {
                discard_uploads(&form, store).await;
                return Err(e);
            }
        };

        let (status, message) = match outcome {
            UpsertOutcome::Created => (StatusCode::CREATED, messages::PERFORMER_CREATED),
            UpsertOutcome::Updated => (StatusCode::OK, messages::PERFORMER_UPDATED),
        };
        let body = MessageResponse {
            message: message.to_owned(),
        };
        Ok((status, Json(body)).into_response())
    }
}
