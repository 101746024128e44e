// ABOUTME: Shared server resources handed to every router as axum state
// ABOUTME: Database, auth, image resolver, upload store and the two profile managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::images::ImageUrlResolver;
use crate::profiles::{HostProfileManager, PerformerProfileManager};
use crate::uploads::{DiskUploadStore, UploadStore};

/// Everything a request handler needs, created once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Connection pool
    pub database: Database,
    /// Bearer token verification
    pub auth_manager: Arc<AuthManager>,
    /// Stored path / public URL conversion
    pub image_resolver: ImageUrlResolver,
    /// Upload persistence
    pub upload_store: Arc<dyn UploadStore>,
    /// Host profile operations
    pub host_profiles: HostProfileManager,
    /// Performer profile operations
    pub performer_profiles: PerformerProfileManager,
}

impl ServerResources {
    /// Wire resources from configuration and an open database, storing
    /// uploads on disk
    #[must_use]
    pub fn new(config: ServerConfig, database: Database) -> Self {
        let upload_store = Arc::new(DiskUploadStore::new(&config.uploads));
        Self::with_upload_store(config, database, upload_store)
    }

    /// Wire resources with a custom upload store
    #[must_use]
    pub fn with_upload_store(
        config: ServerConfig,
        database: Database,
        upload_store: Arc<dyn UploadStore>,
    ) -> Self {
        let image_resolver = ImageUrlResolver::new(config.public_base_url.as_str());
        let auth_manager = Arc::new(AuthManager::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_hours,
        ));
        Self {
            host_profiles: HostProfileManager::new(database.clone(), image_resolver.clone()),
            performer_profiles: PerformerProfileManager::new(
                database.clone(),
                image_resolver.clone(),
            ),
            config: Arc::new(config),
            database,
            auth_manager,
            image_resolver,
            upload_store,
        }
    }
}
