// ABOUTME: Tests for environment configuration loading
// ABOUTME: Defaults, port fallback, secret requirements, URL validation and list parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use gigs_backend::config::{Environment, LogFormat, ServerConfig};
use gigs_backend::errors::{AppResult, ErrorCode};
use gigs_backend::server::request_body_limit;
use serial_test::serial;

fn load(vars: &[(&str, &str)]) -> AppResult<ServerConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_defaults_without_any_variables() {
    let config = load(&[]).unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.database.url, "sqlite:./data/gigs.db");
    assert_eq!(config.public_base_url, "http://localhost:8080");
    assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
    assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000"]);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.auth.jwt_secret.starts_with("dev-"));
}

#[test]
fn test_port_falls_back_to_port_variable() {
    assert_eq!(load(&[("PORT", "5000")]).unwrap().http_port, 5000);
    assert_eq!(
        load(&[("PORT", "5000"), ("HTTP_PORT", "6000")])
            .unwrap()
            .http_port,
        6000
    );
    assert_eq!(load(&[("HTTP_PORT", "  ")]).unwrap().http_port, 8080);
}

#[test]
fn test_invalid_numbers_are_config_errors() {
    let err = load(&[("HTTP_PORT", "eighty")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(load(&[("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());
    assert!(load(&[("MAX_UPLOAD_FILE_BYTES", "5MB")]).is_err());
}

#[test]
fn test_public_base_url_is_validated_and_trimmed() {
    let config = load(&[("PUBLIC_BASE_URL", "https://api.gigs.lk/")]).unwrap();
    assert_eq!(config.public_base_url, "https://api.gigs.lk");

    for bad in ["api.gigs.lk", "ftp://api.gigs.lk", "not a url"] {
        let err = load(&[("PUBLIC_BASE_URL", bad)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError, "{bad:?}");
    }
}

#[test]
fn test_jwt_secret_required_outside_development() {
    let err = load(&[("ENVIRONMENT", "production")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.detail.unwrap().contains("JWT_SECRET"));

    let config = load(&[("ENVIRONMENT", "prod"), ("JWT_SECRET", "s3cret")]).unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.auth.jwt_secret, "s3cret");

    assert!(load(&[("ENVIRONMENT", "qa")]).is_err());
}

#[test]
fn test_secret_is_redacted_in_debug_output() {
    let config = load(&[("JWT_SECRET", "very-private-value")]).unwrap();
    assert!(!format!("{config:?}").contains("very-private-value"));
}

#[test]
fn test_cors_origins_and_log_format() {
    let config = load(&[
        ("CORS_ALLOWED_ORIGINS", "https://gigs.lk, https://www.gigs.lk,,"),
        ("LOG_FORMAT", "JSON"),
    ])
    .unwrap();
    assert_eq!(
        config.cors_allowed_origins,
        vec!["https://gigs.lk", "https://www.gigs.lk"]
    );
    assert_eq!(config.logging.format, LogFormat::Json);

    assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
}

#[test]
fn test_upload_limits_drive_body_limit() {
    let config = load(&[
        ("MAX_UPLOAD_FILE_BYTES", "1000"),
        ("MAX_UPLOADS_PER_FIELD", "4"),
    ])
    .unwrap();
    assert_eq!(config.uploads.max_file_bytes, 1000);
    assert_eq!(config.uploads.max_files_per_field, 4);
    assert_eq!(request_body_limit(&config.uploads), 5000 + 1024 * 1024);
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    env::set_var("HTTP_PORT", "9191");
    env::set_var("PUBLIC_BASE_URL", "https://env.gigs.lk");
    env::set_var("ENVIRONMENT", "development");

    let config = ServerConfig::from_env();

    env::remove_var("HTTP_PORT");
    env::remove_var("PUBLIC_BASE_URL");
    env::remove_var("ENVIRONMENT");

    let config = config.unwrap();
    assert_eq!(config.http_port, 9191);
    assert_eq!(config.public_base_url, "https://env.gigs.lk");
}
