// ABOUTME: Upload storage collaborator for profile pictures and gallery images
// ABOUTME: Validates image files and writes them under unique names in the upload directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Upload storage
//!
//! The profile managers never touch raw bytes: multipart extraction hands each
//! file to an [`UploadStore`] and only the resulting filename flows into the
//! profile write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::constants::uploads::SUPPORTED_EXTENSIONS;
use crate::errors::AppError;

/// Reasons an upload is rejected or fails
#[derive(Debug, Error)]
pub enum UploadError {
    /// File exceeds the configured size limit
    #[error("File too large. Maximum size is {max_bytes} bytes.")]
    TooLarge {
        /// Configured limit
        max_bytes: usize,
    },
    /// Empty file body
    #[error("Empty file provided.")]
    Empty,
    /// Extension missing or not an accepted image type
    #[error("Unsupported file format '{extension}'. Supported: {supported}")]
    UnsupportedFormat {
        /// Offending extension (lowercased, may be empty)
        extension: String,
        /// Comma-separated accepted extensions
        supported: String,
    },
    /// More files were sent for a field than allowed
    #[error("Too many files for field '{field}'. Maximum is {max}.")]
    TooManyFiles {
        /// Multipart field name
        field: String,
        /// Configured limit
        max: usize,
    },
    /// File sent under a field that does not accept files
    #[error("Unexpected file field '{field}'.")]
    UnexpectedField {
        /// Multipart field name
        field: String,
    },
    /// Filesystem failure while writing
    #[error("Failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::Io(ref e) => {
                warn!(error = %e, "upload storage failed");
                Self::upload_failed(error.to_string())
            }
            other => Self::upload_failed(other.to_string()),
        }
    }
}

/// File received from the client, not yet stored
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Multipart field the file arrived in
    pub field: String,
    /// Client-side filename
    pub original_name: String,
    /// File contents
    pub data: Bytes,
}

/// File persisted by an [`UploadStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Multipart field the file arrived in
    pub field: String,
    /// Generated filename inside the upload directory
    pub filename: String,
    /// Client-side filename
    pub original_name: String,
    /// Size in bytes
    pub size: usize,
}

/// Persists uploaded files and reports the stored filename
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Validate and persist one file
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] when the file is rejected or cannot be written
    async fn store(&self, upload: PendingUpload) -> Result<StoredUpload, UploadError>;

    /// Remove a previously stored file (best effort)
    async fn discard(&self, filename: &str);

    /// Maximum number of files accepted per multipart field
    fn max_files_per_field(&self) -> usize;
}

/// Upload store writing into a local directory
#[derive(Debug, Clone)]
pub struct DiskUploadStore {
    dir: PathBuf,
    max_file_bytes: usize,
    max_files_per_field: usize,
}

impl DiskUploadStore {
    /// Create a store from upload configuration
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_file_bytes: config.max_file_bytes,
            max_files_per_field: config.max_files_per_field,
        }
    }

    /// Directory files are written to
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn validate(&self, upload: &PendingUpload) -> Result<String, UploadError> {
        if upload.data.is_empty() {
            return Err(UploadError::Empty);
        }
        if upload.data.len() > self.max_file_bytes {
            return Err(UploadError::TooLarge {
                max_bytes: self.max_file_bytes,
            });
        }
        let extension = Path::new(&upload.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedFormat {
                extension,
                supported: SUPPORTED_EXTENSIONS.join(", "),
            });
        }
        Ok(extension)
    }
}

#[async_trait]
impl UploadStore for DiskUploadStore {
    async fn store(&self, upload: PendingUpload) -> Result<StoredUpload, UploadError> {
        let extension = self.validate(&upload)?;
        let field_slug: String = upload
            .field
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let filename = format!("{field_slug}-{}.{extension}", Uuid::new_v4().simple());

        self.ensure_dir().await?;
        fs::write(self.dir.join(&filename), &upload.data).await?;
        debug!(field = %upload.field, %filename, size = upload.data.len(), "stored upload");

        Ok(StoredUpload {
            field: upload.field,
            filename,
            original_name: upload.original_name,
            size: upload.data.len(),
        })
    }

    async fn discard(&self, filename: &str) {
        if let Err(e) = fs::remove_file(self.dir.join(filename)).await {
            warn!(%filename, error = %e, "failed to remove orphaned upload");
        }
    }

    fn max_files_per_field(&self) -> usize {
        self.max_files_per_field
    }
}
