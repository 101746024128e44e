// ABOUTME: Parsed profile submission: text fields plus stored uploads, keyed by field name
// ABOUTME: Built from multipart or JSON request bodies and consumed by the profile managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

/// Per-kind value coercion
pub mod coercion;
/// Multipart and JSON body extraction
pub mod multipart;

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::uploads::StoredUpload;

/// Client-submitted profile fields
///
/// `fields` holds text values (multipart text parts as strings, JSON bodies
/// with native types). `files` holds uploads already persisted by the upload
/// store, in arrival order per field.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    fields: HashMap<String, Value>,
    files: HashMap<String, Vec<StoredUpload>>,
}

impl ProfileForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from a JSON object body
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the body is not a JSON object
    pub fn from_json(body: Value) -> AppResult<Self> {
        match body {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
                files: HashMap::new(),
            }),
            Value::Null => Ok(Self::default()),
            other => Err(AppError::invalid_input(format!(
                "request body must be a JSON object, got {other}"
            ))),
        }
    }

    /// Set a text field (later values replace earlier ones)
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Append a stored upload under its field name
    #[must_use]
    pub fn with_file(mut self, upload: StoredUpload) -> Self {
        self.push_file(upload);
        self
    }

    pub(crate) fn insert_field(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
    }

    pub(crate) fn push_file(&mut self, upload: StoredUpload) {
        self.files.entry(upload.field.clone()).or_default().push(upload);
    }

    /// Raw value of a text field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the client sent the text field at all
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Uploads stored for a field, in arrival order
    #[must_use]
    pub fn files(&self, name: &str) -> &[StoredUpload] {
        self.files.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// First upload stored for a field
    #[must_use]
    pub fn first_file(&self, name: &str) -> Option<&StoredUpload> {
        self.files(name).first()
    }

    /// Every stored upload, used to clean up after a failed write
    pub fn stored_uploads(&self) -> impl Iterator<Item = &StoredUpload> {
        self.files.values().flatten()
    }
}
