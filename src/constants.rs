// ABOUTME: Application constants for the Gigs profile backend
// ABOUTME: Placeholder images, multipart field names, response messages and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "gigs-backend";

/// URL path under which uploaded files are served
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Placeholder images used by synthesized default profiles
pub mod placeholders {
    /// Host default profile picture
    pub const HOST_PROFILE_PICTURE: &str = "https://placehold.co/150x150/553c9a/ffffff?text=Host";
    /// Performer default profile picture
    pub const PERFORMER_PROFILE_PICTURE: &str =
        "https://placehold.co/150x150/553c9a/ffffff?text=Profile";
}

/// Client field names shared by both profile kinds
pub mod fields {
    /// Uploaded profile picture file, or (as text) the existing picture URL
    pub const PROFILE_PICTURE: &str = "profile_picture";
    /// Existing profile picture URL sent back by the client
    pub const PROFILE_PICTURE_URL: &str = "profile_picture_url";

    /// Host form fields
    pub mod host {
        pub const COMPANY_ORGANIZATION: &str = "company_organization";
        pub const CONTACT_PERSON: &str = "contact_person";
        pub const CONTACT_NUMBER: &str = "contact_number";
        pub const LOCATION: &str = "location";
        pub const EVENT_TYPES: &str = "event_types_typically_hosted";
        pub const BIO: &str = "bio";
        pub const BUDGET_MIN: &str = "default_budget_range_min";
        pub const BUDGET_MAX: &str = "default_budget_range_max";
        pub const PREFERRED_PERFORMER_TYPES: &str = "preferred_performer_types";
        pub const PREFERRED_LOCATIONS: &str = "preferred_locations_for_gigs";
        pub const URGENT_BOOKING: &str = "urgent_booking_enabled";
        pub const EMAIL_NOTIFICATIONS: &str = "email_notifications_enabled";
        pub const SMS_NOTIFICATIONS: &str = "sms_notifications_enabled";
        /// JSON list of fully-qualified URLs already in the gallery
        pub const EXISTING_GALLERY_IMAGES: &str = "existing_gallery_images";
        /// Newly uploaded gallery files
        pub const NEW_GALLERY_IMAGES: &str = "new_gallery_images";
    }

    /// Performer form fields
    pub mod performer {
        pub const FULL_NAME: &str = "full_name";
        pub const STAGE_NAME: &str = "stage_name";
        pub const LOCATION: &str = "location";
        pub const PERFORMANCE_TYPE: &str = "performance_type";
        pub const BIO: &str = "bio";
        pub const PRICE: &str = "price";
        pub const SKILLS: &str = "skills";
        pub const CONTACT_NUMBER: &str = "contact_number";
        pub const DIRECT_BOOKING: &str = "direct_booking";
        pub const TRAVEL_DISTANCE: &str = "travel_distance";
        pub const AVAILABILITY_WEEKDAYS: &str = "availability_weekdays";
        pub const AVAILABILITY_WEEKENDS: &str = "availability_weekends";
        pub const AVAILABILITY_MORNING: &str = "availability_morning";
        pub const AVAILABILITY_EVENING: &str = "availability_evening";
        /// Text: JSON list of existing URLs. File: newly uploaded gallery images.
        pub const GALLERY_IMAGES: &str = "gallery_images";
    }
}

/// Response messages
pub mod messages {
    pub const USER_NOT_FOUND: &str = "User not found.";

    pub const HOST_FETCHED: &str = "Host profile fetched successfully.";
    pub const HOST_DEFAULT: &str = "Host profile not found, returning default.";
    pub const HOST_CREATED: &str = "Host profile created successfully.";
    pub const HOST_UPDATED: &str = "Host profile updated successfully.";

    pub const PERFORMER_FETCHED: &str = "Performer profile fetched successfully.";
    pub const PERFORMER_DEFAULT: &str = "Performer profile not found, returning default.";
    pub const PERFORMER_CREATED: &str = "Performer profile created successfully.";
    pub const PERFORMER_UPDATED: &str = "Performer profile updated successfully.";
    pub const PERFORMERS_LISTED: &str = "All performer profiles fetched successfully.";

    pub const ROOT_BANNER: &str = "Gigs.lk Backend is running!";
}

/// Upload limits and accepted formats
pub mod uploads {
    /// Default maximum size of a single uploaded file (5MB)
    pub const DEFAULT_MAX_FILE_BYTES: usize = 5 * 1024 * 1024;
    /// Default maximum number of files per multipart field
    pub const DEFAULT_MAX_FILES_PER_FIELD: usize = 10;
    /// Accepted image extensions (lowercase)
    pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
}

/// Environment defaults
pub mod defaults {
    pub const HTTP_PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "sqlite:./data/gigs.db";
    pub const PUBLIC_BASE_URL: &str = "http://localhost:8080";
    pub const UPLOAD_DIR: &str = "uploads";
    pub const CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000";
    pub const DATABASE_MAX_CONNECTIONS: u32 = 10;
    pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 30;
    /// `SQLite` busy timeout so concurrent writers wait for the lock
    pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;
    /// Lifetime of tokens minted by `gigs-cli token issue`
    pub const TOKEN_TTL_HOURS: i64 = 24;
}
