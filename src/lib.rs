// ABOUTME: Main library entry point for the Gigs marketplace profile backend
// ABOUTME: Host and performer profile management over HTTP with image upload support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

#![deny(unsafe_code)]

//! # Gigs Backend
//!
//! Profile service for a talent-booking marketplace connecting hosts (event
//! organizers) with performers.
//!
//! ## Architecture
//!
//! - **Profiles**: fetch and atomic create-or-update of host and performer
//!   profiles, keyed by the owning user
//! - **Images**: conversion between stored image paths and public URLs
//! - **Forms**: coercion of multipart/JSON fields and upload extraction
//! - **Routes**: thin axum handlers over the profile managers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gigs_backend::config::ServerConfig;
//! use gigs_backend::database::Database;
//! use gigs_backend::errors::AppResult;
//! use gigs_backend::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database).await?;
//!     gigs_backend::server::serve(ServerResources::new(config, database)).await
//! }
//! ```

/// Bearer token verification and issuance
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Database pool, migrations and transactions
pub mod database;

/// Client field coercion and request body extraction
pub mod forms;

/// Stored image path / public URL conversion
pub mod images;

/// Tracing subscriber setup
pub mod logging;

/// Host and performer profile managers
pub mod profiles;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Upload storage
pub mod uploads;

/// Unified error handling (re-exported from `gigs-core`)
pub use gigs_core::errors;

/// Domain models (re-exported from `gigs-core`)
pub use gigs_core::models;
