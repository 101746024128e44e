// ABOUTME: Coercion of loosely-typed client field values into profile column values
// ABOUTME: One function per kind: flags, string lists, integers, decimals and optional text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Field coercion
//!
//! Multipart text parts arrive as strings while JSON bodies keep their native
//! types, so every coercion accepts a `serde_json::Value`. A missing field is
//! passed as `None`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::errors::{AppError, AppResult};

/// Coerce a boolean flag
///
/// Accepts booleans, numbers (zero is false) and the strings
/// `1/true/on/yes` and `0/false/off/no` (case-insensitive). Absent, null and
/// blank values are false.
///
/// # Errors
///
/// Returns an invalid-input error for any other value
pub fn flag(field: &str, value: Option<&Value>) -> AppResult<bool> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|f| f.abs() > 0.0)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Ok(true),
            "" | "0" | "false" | "off" | "no" => Ok(false),
            other => Err(AppError::invalid_input(format!(
                "{field}: expected a boolean, got '{other}'"
            ))),
        },
        Some(other) => Err(AppError::invalid_input(format!(
            "{field}: expected a boolean, got {other}"
        ))),
    }
}

/// Coerce a list of strings
///
/// Accepts a native array of strings or text holding a JSON array of
/// strings. Absent, null and blank values yield an empty list.
///
/// # Errors
///
/// Returns an invalid-input error when the value is not a list of strings
pub fn string_list(field: &str, value: Option<&Value>) -> AppResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => array_of_strings(field, items),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => array_of_strings(field, &items),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(_) => Err(AppError::invalid_input(format!(
                "{field}: expected a JSON array"
            ))),
            Err(e) => Err(AppError::invalid_input(format!(
                "{field}: malformed JSON list: {e}"
            ))),
        },
        Some(other) => Err(AppError::invalid_input(format!(
            "{field}: expected a list, got {other}"
        ))),
    }
}

fn array_of_strings(field: &str, items: &[Value]) -> AppResult<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(AppError::invalid_input(format!(
                "{field}: list entries must be strings, got {other}"
            ))),
        })
        .collect()
}

/// Coerce a non-negative integer, defaulting to 0
///
/// Text is read like a leading decimal integer, so `"25km"` is 25.
/// Unparsable and negative values normalize to 0.
#[must_use]
pub fn non_negative_integer(field: &str, value: Option<&Value>) -> i64 {
    let parsed = match value {
        None | Some(Value::Null) => return 0,
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        Some(_) => None,
    };
    match parsed {
        Some(n) if n >= 0 => n,
        Some(n) => {
            warn!(field, value = n, "negative integer normalized to 0");
            0
        }
        None => {
            warn!(field, value = ?value, "unparsable integer normalized to 0");
            0
        }
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Coerce an exact decimal
///
/// Absent, null and blank values are zero.
///
/// # Errors
///
/// Returns an invalid-input error when the value is not a number
pub fn decimal(field: &str, value: Option<&Value>) -> AppResult<Decimal> {
    let text = match value {
        None | Some(Value::Null) => return Ok(Decimal::ZERO),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(Decimal::ZERO),
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(other) => {
            return Err(AppError::invalid_input(format!(
                "{field}: expected a number, got {other}"
            )))
        }
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(|d| d.normalize())
        .map_err(|e| AppError::invalid_input(format!("{field}: '{text}' is not a number: {e}")))
}

/// Coerce optional free text
///
/// Strings are kept as-is; numbers and booleans are rendered as text.
///
/// # Errors
///
/// Returns an invalid-input error for arrays and objects
pub fn optional_text(field: &str, value: Option<&Value>) -> AppResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(AppError::invalid_input(format!(
            "{field}: expected text"
        ))),
    }
}
