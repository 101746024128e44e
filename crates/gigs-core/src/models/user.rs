// ABOUTME: Marketplace user account model (owned by the authentication collaborator)
// ABOUTME: Read-only to the profile core; supplies username fallbacks for default profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric user identifier (primary key of the `users` table)
pub type UserId = i64;

/// Marketplace role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Event organizer
    Host,
    /// Talent offering performances
    Performer,
    /// Platform administrator
    Admin,
}

impl UserRole {
    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Performer => "performer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(Self::Host),
            "performer" => Ok(Self::Performer),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown user role '{other}'")),
        }
    }
}

/// User account as seen by the profile core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Display handle, used as the fallback name of default profiles
    pub username: String,
    /// Contact email
    pub email: String,
    /// Marketplace role
    pub role: UserRole,
}
