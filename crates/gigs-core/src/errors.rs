// ABOUTME: Unified application error type with standard error codes
// ABOUTME: Maps every failure kind to an HTTP status and the `{message, error}` response body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Error handling for the profile service
//!
//! Every fallible operation in the backend returns [`AppResult`]. The error
//! carries an [`ErrorCode`] (which decides the HTTP status), a client-facing
//! `message` and an optional `detail` that is surfaced as the `error` field of
//! the response body.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generic message for failures the client cannot fix
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Generic message for malformed client input
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input.";

/// Fallback message when the upload collaborator gives no reason
pub const UPLOAD_FAILED_MESSAGE: &str = "File upload failed.";

/// Standard error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No credentials were supplied
    AuthRequired,
    /// Credentials were supplied but could not be verified
    AuthInvalid,
    /// A client field could not be parsed
    InvalidInput,
    /// The upload collaborator rejected or failed to store a file
    UploadFailed,
    /// The requested resource does not exist
    ResourceNotFound,
    /// A storage operation failed (transaction rolled back)
    DatabaseError,
    /// Unexpected server-side failure
    InternalError,
    /// Invalid or missing configuration
    ConfigError,
}

impl ErrorCode {
    /// HTTP status code for this error code
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::AuthRequired | Self::AuthInvalid => 401,
            Self::InvalidInput | Self::UploadFailed => 400,
            Self::ResourceNotFound => 404,
            Self::DatabaseError | Self::InternalError | Self::ConfigError => 500,
        }
    }

    /// Short machine-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "auth_required",
            Self::AuthInvalid => "auth_invalid",
            Self::InvalidInput => "invalid_input",
            Self::UploadFailed => "upload_failed",
            Self::ResourceNotFound => "resource_not_found",
            Self::DatabaseError => "database_error",
            Self::InternalError => "internal_error",
            Self::ConfigError => "config_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Client-facing message (the `message` field of the response)
    pub message: String,
    /// Underlying cause, exposed as the `error` field of the response
    pub detail: Option<String>,
}

/// Result alias used across the workspace
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an error with an explicit code and client-facing message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Storage failure; the cause is exposed to the client for diagnostics
    #[must_use]
    pub fn database(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, INTERNAL_ERROR_MESSAGE).with_detail(detail)
    }

    /// Unexpected server-side failure
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, INTERNAL_ERROR_MESSAGE).with_detail(detail)
    }

    /// Malformed client input
    #[must_use]
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, INVALID_INPUT_MESSAGE).with_detail(detail)
    }

    /// Missing resource; `message` is returned verbatim
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Upload collaborator failure; `message` is returned verbatim
    #[must_use]
    pub fn upload_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::new(ErrorCode::UploadFailed, UPLOAD_FAILED_MESSAGE)
        } else {
            Self::new(ErrorCode::UploadFailed, message)
        }
    }

    /// Missing credentials
    #[must_use]
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Invalid credentials
    #[must_use]
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Configuration problem detected at startup
    #[must_use]
    pub fn config(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, "Invalid configuration.").with_detail(detail)
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Response body for this error
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.message.clone(),
            error: self.detail.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({}): {detail}", self.message, self.code),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

impl std::error::Error for AppError {}

/// JSON error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-facing message
    pub message: String,
    /// Underlying cause, when there is one worth exposing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(feature = "http-response")]
mod http_response {
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    use super::AppError;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status =
                StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(code = %self.code, detail = ?self.detail, "{}", self.message);
            } else {
                tracing::debug!(code = %self.code, detail = ?self.detail, "{}", self.message);
            }
            (status, Json(self.body())).into_response()
        }
    }
}
