// ABOUTME: Environment-based configuration for the profile backend server
// ABOUTME: Parses ports, database pool, public base URL, uploads, JWT secret and log format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Server configuration loaded from environment variables
//!
//! Every setting has a development default except the JWT secret, which must
//! be provided explicitly outside the development environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::constants::{defaults, uploads};
use crate::errors::{AppError, AppResult};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development (insecure defaults allowed)
    #[default]
    Development,
    /// Pre-production
    Staging,
    /// Production
    Production,
}

impl Environment {
    /// Whether insecure development defaults may be used
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Canonical name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "dev" | "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "prod" | "production" => Ok(Self::Production),
            other => Err(AppError::config(format!("unknown ENVIRONMENT '{other}'"))),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!("unknown LOG_FORMAT '{other}'"))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_filter: "gigs_backend=info,tower_http=info".to_owned(),
        }
    }
}

/// `SQLite` connection pool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabasePoolConfig {
    /// Connection URL (`sqlite:` scheme)
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl DatabasePoolConfig {
    /// Pool settings for the given URL with default limits
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(defaults::DATABASE_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

/// Upload storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Directory uploaded files are written to and served from
    pub dir: PathBuf,
    /// Maximum size of a single file in bytes
    pub max_file_bytes: usize,
    /// Maximum number of files accepted per multipart field
    pub max_files_per_field: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::UPLOAD_DIR),
            max_file_bytes: uploads::DEFAULT_MAX_FILE_BYTES,
            max_files_per_field: uploads::DEFAULT_MAX_FILES_PER_FIELD,
        }
    }
}

/// Token verification settings
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Lifetime of tokens minted by this service
    pub token_ttl_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP listen port
    pub http_port: u16,
    /// Database pool
    pub database: DatabasePoolConfig,
    /// Origin (scheme + host + optional port) used to build absolute image URLs
    pub public_base_url: String,
    /// Upload storage
    pub uploads: UploadConfig,
    /// Token verification
    pub auth: AuthConfig,
    /// Origins allowed by CORS; `*` allows any origin
    pub cors_allowed_origins: Vec<String>,
    /// Logging
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is present but malformed,
    /// or if `JWT_SECRET` is missing outside development
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .map(|value| value.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let http_port = match var("HTTP_PORT").or_else(|| var("PORT")) {
            Some(port) => parse_number::<u16>("HTTP_PORT", &port)?,
            None => defaults::HTTP_PORT,
        };

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
        let mut database = DatabasePoolConfig::with_url(database_url);
        if let Some(max) = var("DATABASE_MAX_CONNECTIONS") {
            database.max_connections = parse_number("DATABASE_MAX_CONNECTIONS", &max)?;
        }
        if let Some(secs) = var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            database.acquire_timeout =
                Duration::from_secs(parse_number("DATABASE_ACQUIRE_TIMEOUT_SECS", &secs)?);
        }

        let public_base_url = normalize_base_url(
            &var("PUBLIC_BASE_URL").unwrap_or_else(|| defaults::PUBLIC_BASE_URL.to_owned()),
        )?;

        let mut upload_config = UploadConfig::default();
        if let Some(dir) = var("UPLOAD_DIR") {
            upload_config.dir = PathBuf::from(dir);
        }
        if let Some(bytes) = var("MAX_UPLOAD_FILE_BYTES") {
            upload_config.max_file_bytes = parse_number("MAX_UPLOAD_FILE_BYTES", &bytes)?;
        }
        if let Some(count) = var("MAX_UPLOADS_PER_FIELD") {
            upload_config.max_files_per_field = parse_number("MAX_UPLOADS_PER_FIELD", &count)?;
        }

        let auth = AuthConfig {
            jwt_secret: require_secret(var("JWT_SECRET"), "JWT_SECRET", environment)?,
            token_ttl_hours: defaults::TOKEN_TTL_HOURS,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| defaults::CORS_ALLOWED_ORIGINS.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        let mut logging = LoggingConfig::default();
        if let Some(format) = var("LOG_FORMAT") {
            logging.format = format.parse()?;
        }

        Ok(Self {
            environment,
            http_port,
            database,
            public_base_url,
            uploads: upload_config,
            auth,
            cors_allowed_origins,
            logging,
        })
    }
}

/// Require a secret: must be set outside development, falls back to an
/// obviously-insecure value in development
fn require_secret(value: Option<String>, name: &str, environment: Environment) -> AppResult<String> {
    match value {
        Some(secret) => Ok(secret),
        None if environment.is_development() => Ok(format!("dev-{name}-not-for-production")),
        None => Err(AppError::config(format!(
            "{name} must be set in {environment} environment"
        ))),
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{name} must be a non-negative integer, got '{raw}'")))
}

/// Validate an http(s) origin and strip trailing slashes
///
/// # Errors
///
/// Returns a configuration error when the value is not an absolute http(s) URL
pub fn normalize_base_url(raw: &str) -> AppResult<String> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| AppError::config(format!("PUBLIC_BASE_URL '{raw}' is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::config(format!(
            "PUBLIC_BASE_URL '{raw}' must be an http(s) URL with a host"
        )));
    }
    Ok(raw.trim().trim_end_matches('/').to_owned())
}
