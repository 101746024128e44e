// ABOUTME: Domain models shared by the server, CLI and tests
// ABOUTME: Re-exports user, host profile and performer profile types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

/// Host (event organizer) profile view
pub mod host;
/// Performer profile view
pub mod performer;
/// Marketplace user account
pub mod user;

pub use host::HostProfile;
pub use performer::PerformerProfile;
pub use user::{User, UserId, UserRole};
