// ABOUTME: Image reference resolver converting between stored paths and public URLs
// ABOUTME: Stored form is a storage-relative path such as /uploads/<file>; clients see absolute URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

//! Image reference resolution
//!
//! Profile images are persisted as storage-relative paths (`/uploads/<file>`)
//! and presented to clients as fully-qualified URLs under the configured
//! public base URL. Both directions are pure functions of the input and the
//! base URL.

use tracing::debug;
use url::{ParseError, Url};

use crate::constants::UPLOADS_ROUTE;

/// Result of normalizing a client-supplied gallery for storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryNormalization {
    /// Storage-relative paths, in client order
    pub kept: Vec<String>,
    /// Entries that could not be mapped to a stored path
    pub dropped: Vec<String>,
}

/// Converts image references between stored and presented forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlResolver {
    base_url: String,
}

impl ImageUrlResolver {
    /// Create a resolver for the given public origin (trailing slashes are ignored)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    /// Public origin used for absolute URLs
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Storage-relative path of an uploaded file
    #[must_use]
    pub fn upload_path(filename: &str) -> String {
        format!("{UPLOADS_ROUTE}/{}", filename.trim_start_matches('/'))
    }

    /// Map a stored reference to the URL presented to clients
    ///
    /// Blank input yields `None`. References that are already absolute
    /// `http(s)` URLs are returned unchanged. Anything else is treated as a
    /// path under the base URL.
    #[must_use]
    pub fn to_absolute(&self, stored: Option<&str>) -> Option<String> {
        let stored = stored?.trim();
        if stored.is_empty() {
            return None;
        }
        if is_http_url(stored) {
            return Some(stored.to_owned());
        }
        Some(format!("{}/{}", self.base_url, stored.trim_start_matches('/')))
    }

    /// Map a client-supplied reference to the stored form
    ///
    /// Returns `None` for blank input, transient `blob:` references and
    /// absolute URLs that do not belong to this deployment. Scheme-less
    /// references are already relative and are returned unchanged.
    #[must_use]
    pub fn to_relative(&self, client: &str) -> Option<String> {
        let client = client.trim();
        if client.is_empty() || client.starts_with("blob:") {
            return None;
        }
        if let Some(rest) = client.strip_prefix(self.base_url.as_str()) {
            if rest.is_empty() || rest.starts_with('/') {
                return Some(format!("/{}", rest.trim_start_matches('/')));
            }
        }
        match Url::parse(client) {
            Err(ParseError::RelativeUrlWithoutBase) => Some(client.to_owned()),
            _ => None,
        }
    }

    /// Map a trusted client reference to the stored form
    ///
    /// Same as [`Self::to_relative`], except that `http(s)` URLs on other
    /// origins are kept verbatim instead of being rejected.
    #[must_use]
    pub fn to_stored(&self, client: &str) -> Option<String> {
        self.to_relative(client).or_else(|| {
            let client = client.trim();
            is_http_url(client).then(|| client.to_owned())
        })
    }

    /// Present a stored gallery, dropping blank entries
    #[must_use]
    pub fn gallery_to_absolute(&self, stored: &[String]) -> Vec<String> {
        stored
            .iter()
            .filter_map(|entry| self.to_absolute(Some(entry)))
            .collect()
    }

    /// Normalize a client-supplied gallery to stored paths
    #[must_use]
    pub fn gallery_to_relative(&self, client: &[String]) -> GalleryNormalization {
        let mut normalization = GalleryNormalization::default();
        for entry in client {
            match self.to_relative(entry) {
                Some(path) => normalization.kept.push(path),
                None if entry.trim().is_empty() => {}
                None => {
                    debug!(entry = %entry, "dropping unresolvable gallery image reference");
                    normalization.dropped.push(entry.clone());
                }
            }
        }
        normalization
    }
}

fn is_http_url(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
