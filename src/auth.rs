// ABOUTME: JWT bearer token verification and issuance (HS256)
// ABOUTME: Turns an Authorization or x-auth-token header into the authenticated user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Authentication
//!
//! Login and registration live in a separate service; this module only
//! verifies the tokens it issues. The `sub` claim carries the numeric user id.

use std::fmt;

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::{User, UserId, UserRole};

/// Header used by legacy clients instead of `Authorization`
pub const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a decimal string
    pub sub: String,
    /// Marketplace role at issue time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Identity extracted from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user
    pub user_id: UserId,
    /// Role claimed by the token, if any
    pub role: Option<UserRole>,
}

/// Verifies and issues bearer tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a manager for an HS256 secret
    #[must_use]
    pub fn new(secret: &str, token_ttl_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Issue a token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: Some(user.role),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a raw token
    ///
    /// # Errors
    ///
    /// Returns an auth-invalid error if the signature, expiry or subject is invalid
    pub fn verify_token(&self, token: &str) -> AppResult<AuthResult> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AppError::auth_invalid(format!("Authentication failed: {e}"))
        })?;
        let user_id = data.claims.sub.parse::<UserId>().map_err(|_| {
            AppError::auth_invalid("Authentication failed: subject is not a user id")
        })?;
        Ok(AuthResult {
            user_id,
            role: data.claims.role,
        })
    }

    /// Authenticate a request from its headers
    ///
    /// Reads `Authorization: Bearer <token>` first, then `x-auth-token`.
    ///
    /// # Errors
    ///
    /// Returns auth-required when no token is present and auth-invalid when
    /// the token does not verify
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let header_value = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let token = if let Some(authorization) = header_value("authorization") {
            authorization
                .strip_prefix("Bearer ")
                .or_else(|| authorization.strip_prefix("bearer "))
                .map(str::trim)
                .ok_or_else(|| {
                    AppError::auth_invalid("Authorization header must use the Bearer scheme")
                })?
        } else if let Some(token) = header_value(LEGACY_TOKEN_HEADER) {
            token
        } else {
            return Err(AppError::auth_required("No token, authorization denied."));
        };

        self.verify_token(token)
    }
}
