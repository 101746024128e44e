// ABOUTME: Performer profile view returned to clients and the public listing
// ABOUTME: Image fields are always fully-qualified URLs in this view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use serde::{Deserialize, Serialize};

use super::host::NOT_SET;
use super::user::{User, UserId};

/// Bio shown until the performer writes one
pub const DEFAULT_PERFORMER_BIO: &str = "Tell us about your talent and experience!";

/// Price range shown until the performer sets one
pub const DEFAULT_PRICE_DISPLAY: &str = "Rs. 0 - Rs. 0";

/// Performer profile as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerProfile {
    /// Row id (`None` for the synthesized default)
    pub id: Option<i64>,
    /// Owning user
    pub user_id: UserId,
    /// Legal or full name
    pub full_name: Option<String>,
    /// Stage name
    pub stage_name: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Kind of performance (band, DJ, dancer...)
    pub performance_type: Option<String>,
    /// Free-text bio
    pub bio: Option<String>,
    /// Human-readable price range
    pub price: Option<String>,
    /// Skill tags
    pub skills: Vec<String>,
    /// Fully-qualified profile picture URL
    pub profile_picture_url: Option<String>,
    /// Contact phone number
    pub contact_number: Option<String>,
    /// Accepts direct bookings
    pub direct_booking: bool,
    /// Maximum travel distance in kilometres
    pub travel_distance: i64,
    /// Available on weekdays
    pub availability_weekdays: bool,
    /// Available on weekends
    pub availability_weekends: bool,
    /// Available in the morning
    pub availability_morning: bool,
    /// Available in the evening
    pub availability_evening: bool,
    /// Fully-qualified gallery image URLs, in upload order
    pub gallery_images: Vec<String>,
    /// Average review rating (read-only aggregate)
    pub rating: f64,
    /// Number of reviews (read-only aggregate)
    pub review_count: i64,
}

impl PerformerProfile {
    /// Transient profile returned when the user has never saved one
    #[must_use]
    pub fn default_for(user: &User, placeholder_picture_url: &str) -> Self {
        Self {
            id: None,
            user_id: user.id,
            full_name: Some(user.username.clone()),
            stage_name: Some(user.username.clone()),
            location: Some(NOT_SET.to_owned()),
            performance_type: Some(NOT_SET.to_owned()),
            bio: Some(DEFAULT_PERFORMER_BIO.to_owned()),
            price: Some(DEFAULT_PRICE_DISPLAY.to_owned()),
            skills: Vec::new(),
            profile_picture_url: Some(placeholder_picture_url.to_owned()),
            contact_number: Some(NOT_SET.to_owned()),
            direct_booking: false,
            travel_distance: 0,
            availability_weekdays: false,
            availability_weekends: false,
            availability_morning: false,
            availability_evening: false,
            gallery_images: Vec::new(),
            rating: 0.0,
            review_count: 0,
        }
    }
}
