// ABOUTME: Configuration module for the Gigs profile backend
// ABOUTME: Environment-driven server, database, upload, auth and logging settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

/// Environment variable parsing into typed configuration
pub mod environment;

pub use environment::{
    AuthConfig, DatabasePoolConfig, Environment, LogFormat, LoggingConfig, ServerConfig,
    UploadConfig,
};
