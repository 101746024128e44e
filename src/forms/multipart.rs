// ABOUTME: Extracts a ProfileForm from multipart, JSON or urlencoded request bodies
// ABOUTME: File parts are handed to the upload store; text parts become string field values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde_json::Value;
use tracing::debug;

use super::ProfileForm;
use crate::errors::{AppError, AppResult};
use crate::uploads::{PendingUpload, UploadError, UploadStore};

/// A multipart field that may carry files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileField {
    /// Multipart field name
    pub name: &'static str,
    /// Field-specific cap; `None` defers to the store's per-field limit
    pub max_files: Option<usize>,
}

impl FileField {
    /// Field accepting at most one file
    #[must_use]
    pub const fn single(name: &'static str) -> Self {
        Self {
            name,
            max_files: Some(1),
        }
    }

    /// Field accepting up to the store's per-field limit
    #[must_use]
    pub const fn many(name: &'static str) -> Self {
        Self {
            name,
            max_files: None,
        }
    }

    fn limit(&self, store: &dyn UploadStore) -> usize {
        let store_max = store.max_files_per_field();
        self.max_files.map_or(store_max, |max| max.min(store_max))
    }
}

/// Read a profile submission from any supported body encoding
///
/// `multipart/form-data` bodies may carry files under the `file_fields`
/// names only; JSON and urlencoded bodies carry text fields only.
///
/// # Errors
///
/// Returns an upload error if a file is rejected or cannot be stored, and an
/// invalid-input error for malformed or unsupported bodies
pub async fn extract_profile_form(
    request: Request,
    store: &dyn UploadStore,
    file_fields: &[FileField],
) -> AppResult<ProfileForm> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::invalid_input(format!("Invalid multipart request: {e}")))?;
        return from_multipart(multipart, store, file_fields).await;
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| AppError::invalid_input(format!("Invalid form body: {e}")))?;
        let mut form = ProfileForm::new();
        for (name, value) in pairs {
            form.insert_field(name, Value::String(value));
        }
        return Ok(form);
    }

    if content_type.is_empty() || content_type.starts_with("application/json") {
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|e| AppError::invalid_input(format!("Failed to read request body: {e}")))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProfileForm::new());
        }
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::invalid_input(format!("Malformed JSON body: {e}")))?;
        return ProfileForm::from_json(value);
    }

    Err(AppError::invalid_input(format!(
        "Unsupported content type '{content_type}'"
    )))
}

/// Walk a multipart stream, storing every accepted file part
///
/// Parts with a filename are files; an empty part with an empty filename
/// (an unused file input) is skipped. A file under a field outside
/// `file_fields`, or past its field's cap, is rejected before it reaches
/// the store. Files stored before a failure are discarded.
///
/// # Errors
///
/// Returns an upload error if the stream is malformed or a file is rejected
pub async fn from_multipart(
    mut multipart: Multipart,
    store: &dyn UploadStore,
    file_fields: &[FileField],
) -> AppResult<ProfileForm> {
    let mut form = ProfileForm::new();
    match collect_parts(&mut multipart, store, file_fields, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            discard_uploads(&form, store).await;
            Err(e)
        }
    }
}

async fn collect_parts(
    multipart: &mut Multipart,
    store: &dyn UploadStore,
    file_fields: &[FileField],
    form: &mut ProfileForm,
) -> AppResult<()> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::upload_failed(format!("Invalid multipart request: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if let Some(original_name) = field.file_name().map(str::to_owned) {
            let data = field.bytes().await.map_err(|e| {
                AppError::upload_failed(format!("Failed to read file '{original_name}': {e}"))
            })?;
            if original_name.is_empty() && data.is_empty() {
                debug!(field = %name, "skipping empty file part");
                continue;
            }
            let Some(accepted) = file_fields.iter().find(|f| f.name == name) else {
                return Err(UploadError::UnexpectedField { field: name }.into());
            };
            let max = accepted.limit(store);
            if form.files(&name).len() >= max {
                return Err(UploadError::TooManyFiles { field: name, max }.into());
            }
            let stored = store
                .store(PendingUpload {
                    field: name,
                    original_name,
                    data,
                })
                .await?;
            form.push_file(stored);
        } else {
            let text = field.text().await.map_err(|e| {
                AppError::invalid_input(format!("Failed to read field '{name}': {e}"))
            })?;
            form.insert_field(name, Value::String(text));
        }
    }
    Ok(())
}

/// Remove every file a form stored, after the profile write failed
pub async fn discard_uploads(form: &ProfileForm, store: &dyn UploadStore) {
    for upload in form.stored_uploads() {
        store.discard(&upload.filename).await;
    }
}
