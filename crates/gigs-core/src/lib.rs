// ABOUTME: Shared core crate for the Gigs marketplace backend
// ABOUTME: Exposes the unified error type and the host/performer/user domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

#![deny(unsafe_code)]

//! # Gigs Core
//!
//! Types shared between the HTTP server, the CLI and the integration tests:
//!
//! - [`errors`]: `AppError` / `ErrorCode` with HTTP status mapping
//! - [`models`]: users and the two profile views returned to clients

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Domain models for users, host profiles and performer profiles
pub mod models;
