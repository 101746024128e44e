// ABOUTME: Host and performer profile managers implementing fetch and atomic upsert
// ABOUTME: Shared column encoding helpers and the created/updated outcome of an upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Profile management
//!
//! Both managers follow the same protocol: look the user up (404 when
//! missing), then inside a single transaction attempt
//! `INSERT ... ON CONFLICT(user_id) DO NOTHING` and fall back to an `UPDATE`
//! when the row already exists. The affected-row count of the insert decides
//! between "created" and "updated".

/// Host profile manager
pub mod host;
/// Performer profile manager
pub mod performer;

pub use host::{HostProfileManager, HostProfileUpdate};
pub use performer::{ImageChange, PerformerProfileManager, PerformerProfileUpdate};

use crate::errors::{AppError, AppResult};

/// Result of a successful upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was inserted
    Created,
    /// The existing row was updated
    Updated,
}

impl UpsertOutcome {
    /// Whether the upsert created the profile
    #[must_use]
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Profile returned by a fetch, flagged when it is the synthesized default
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLookup<T> {
    /// Profile view
    pub profile: T,
    /// `true` when no row exists and `profile` is a transient default
    pub is_default: bool,
}

/// Serialize a multi-value field for its text column
pub(crate) fn encode_list(column: &str, values: &[String]) -> AppResult<String> {
    serde_json::to_string(values)
        .map_err(|e| AppError::internal(format!("Failed to serialize {column}: {e}")))
}

/// Deserialize a multi-value text column; null or blank is an empty list
pub(crate) fn decode_list(column: &str, raw: Option<String>) -> AppResult<Vec<String>> {
    match raw {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
            .map_err(|e| AppError::internal(format!("Corrupt {column} column: {e}"))),
        _ => Ok(Vec::new()),
    }
}

pub(crate) fn flag_column(value: bool) -> i64 {
    i64::from(value)
}
