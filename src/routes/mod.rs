// ABOUTME: Route module organization for the profile backend HTTP endpoints
// ABOUTME: Host, performer and health routers plus the shared JSON response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! HTTP routes
//!
//! Each router is a thin layer: authenticate, extract the submitted form,
//! delegate to a profile manager and shape the response.

/// Health check and banner routes
pub mod health;
/// Host profile routes
pub mod hosts;
/// Performer profile routes
pub mod performers;

pub use health::HealthRoutes;
pub use hosts::HostRoutes;
pub use performers::PerformerRoutes;

use serde::{Deserialize, Serialize};

/// `{message, profile}` body of a profile fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse<T> {
    /// Human-readable outcome
    pub message: String,
    /// Profile view
    pub profile: T,
}

/// `{message, profiles}` body of the public performer listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileListResponse<T> {
    /// Human-readable outcome
    pub message: String,
    /// Profile views
    pub profiles: Vec<T>,
}

/// `{message}` body of an upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}
