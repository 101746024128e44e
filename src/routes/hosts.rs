// ABOUTME: Route handlers for the authenticated host profile endpoints
// ABOUTME: GET fetches (or synthesizes) the caller's profile; PUT/POST upserts it
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

use super::{MessageResponse, ProfileResponse};
use crate::constants::messages;
use crate::errors::AppError;
use crate::forms::multipart::{discard_uploads, extract_profile_form};
use crate::profiles::{HostProfileUpdate, UpsertOutcome};
use crate::resources::ServerResources;

/// Host profile routes configuration
pub struct HostRoutes;

impl HostRoutes {
    /// Create the host profile router
    ///
    /// # Endpoints
    ///
    /// - `GET /api/hosts/profile` - Fetch the caller's host profile
    /// - `PUT /api/hosts/profile` - Create or update it (multipart or JSON)
    /// - `POST /api/hosts/profile` - Same as `PUT`
    pub fn router(resources: &ServerResources) -> Router {
        Router::new()
            .route(
                "/api/hosts/profile",
                get(Self::handle_get_profile)
                    .put(Self::handle_upsert_profile)
                    .post(Self::handle_upsert_profile),
            )
            .with_state(Arc::new(resources.clone()))
    }

    /// Handle GET /api/hosts/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let lookup = resources.host_profiles.fetch(auth.user_id).await?;

        let message = if lookup.is_default {
            messages::HOST_DEFAULT
        } else {
            messages::HOST_FETCHED
        };
        let body = ProfileResponse {
            message: message.to_owned(),
            profile: lookup.profile,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle PUT|POST /api/hosts/profile
    async fn handle_upsert_profile(
        State(resources): State<Arc<ServerResources>>,
        request: Request,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(request.headers())?;
        let store = resources.upload_store.as_ref();
        let form =
            extract_profile_form(request, store, HostProfileUpdate::FILE_FIELDS).await?;

        let outcome = match resources.host_profiles.upsert(auth.user_id, &form).await {
            Ok(outcome) => outcome,
            Err(e) => {
                discard_uploads(&form, store).await;
                return Err(e);
            }
        };

        let (status, message) = match outcome {
            UpsertOutcome::Created => (StatusCode::CREATED, messages::HOST_CREATED),
            UpsertOutcome::Updated => (StatusCode::OK, messages::HOST_UPDATED),
        };
        let body = MessageResponse {
            message: message.to_owned(),
        };
        Ok((status, Json(body)).into_response())
    }
}
