// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test configuration, users and bearer tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `gigs_backend`

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use gigs_backend::config::{DatabasePoolConfig, ServerConfig};
use gigs_backend::database::Database;
use gigs_backend::images::ImageUrlResolver;
use gigs_backend::models::{User, UserRole};
use gigs_backend::profiles::{HostProfileManager, PerformerProfileManager};
use gigs_backend::resources::ServerResources;
use gigs_backend::uploads::StoredUpload;
use tempfile::TempDir;
use uuid::Uuid;

/// Public origin used by every test configuration
pub const TEST_BASE_URL: &str = "http://test.gigs.local";

/// Signing secret used by every test configuration
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging once per process (`TEST_LOG=DEBUG` for more output)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Build a configuration through the same lookup path as `from_env`
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("ENVIRONMENT", "development".to_owned()),
        ("DATABASE_URL", "sqlite::memory:".to_owned()),
        ("PUBLIC_BASE_URL", TEST_BASE_URL.to_owned()),
        ("UPLOAD_DIR", upload_dir.display().to_string()),
        ("JWT_SECRET", TEST_JWT_SECRET.to_owned()),
        ("CORS_ALLOWED_ORIGINS", "*".to_owned()),
    ]);
    ServerConfig::from_lookup(|name| vars.get(name).cloned()).expect("test config")
}

/// Standard test database setup (fresh, isolated in-memory database)
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabasePoolConfig::with_url("sqlite::memory:")).await?)
}

/// In-memory database with a small pool and short acquire timeout
pub async fn create_constrained_database(max_connections: u32) -> Result<Database> {
    init_test_logging();
    let config = DatabasePoolConfig {
        url: "sqlite::memory:".to_owned(),
        max_connections,
        acquire_timeout: Duration::from_secs(2),
    };
    Ok(Database::new(&config).await?)
}

/// Resolver for the test origin
pub fn test_resolver() -> ImageUrlResolver {
    ImageUrlResolver::new(TEST_BASE_URL)
}

/// Host profile manager over a database
pub fn host_manager(database: &Database) -> HostProfileManager {
    HostProfileManager::new(database.clone(), test_resolver())
}

/// Performer profile manager over a database
pub fn performer_manager(database: &Database) -> PerformerProfileManager {
    PerformerProfileManager::new(database.clone(), test_resolver())
}

/// Full server resources with uploads written to a temporary directory
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn create_test_server_resources() -> Result<(ServerResources, TempDir)> {
    let upload_dir = TempDir::new()?;
    let config = test_config(upload_dir.path());
    let database = create_test_database().await?;
    Ok((ServerResources::new(config, database), upload_dir))
}

/// Create a user with a unique email
pub async fn create_test_user(database: &Database, role: UserRole) -> Result<User> {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user_{}", &suffix[..8]);
    let email = format!("{username}@example.com");
    Ok(database.create_user(&username, &email, role).await?)
}

/// `Authorization` header value for a user
pub fn bearer_token(resources: &ServerResources, user: &User) -> String {
    let token = resources
        .auth_manager
        .generate_token(user)
        .expect("token generation");
    format!("Bearer {token}")
}

/// Upload record as produced by the upload store
pub fn stored_upload(field: &str, filename: &str) -> StoredUpload {
    StoredUpload {
        field: field.to_owned(),
        filename: filename.to_owned(),
        original_name: filename.to_owned(),
        size: 1,
    }
}

/// Number of rows in a table owned by a user
pub async fn profile_row_count(database: &Database, table: &str, user_id: i64) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1"))
        .bind(user_id)
        .fetch_one(database.pool())
        .await
        .expect("count query")
}
