// ABOUTME: Host profile view returned to clients
// ABOUTME: Same shape for persisted profiles and the synthesized default profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::{User, UserId};

/// Value shown for text fields of profiles that have not been filled in yet
pub const NOT_SET: &str = "Not Set";

/// Host profile as presented to clients
///
/// `events_hosted`, `average_rating` and `total_reviews` are maintained by the
/// review/booking collaborators and are never written by the profile upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostProfile {
    /// Row id (`None` for the synthesized default)
    pub id: Option<i64>,
    /// Owning user
    pub user_id: UserId,
    /// Organization name
    pub company_organization: Option<String>,
    /// Contact person
    pub contact_person: Option<String>,
    /// Contact phone number
    pub contact_number: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Event-type tags
    pub event_types_typically_hosted: Vec<String>,
    /// Free-text bio
    pub bio: Option<String>,
    /// Lower budget bound
    pub default_budget_range_min: Decimal,
    /// Upper budget bound
    pub default_budget_range_max: Decimal,
    /// Preferred performer-type tags
    pub preferred_performer_types: Vec<String>,
    /// Preferred gig location tags
    pub preferred_locations_for_gigs: Vec<String>,
    /// Accepts urgent bookings
    pub urgent_booking_enabled: bool,
    /// Email notifications enabled
    pub email_notifications_enabled: bool,
    /// SMS notifications enabled
    pub sms_notifications_enabled: bool,
    /// Fully-qualified profile picture URL
    pub profile_picture_url: Option<String>,
    /// Fully-qualified gallery image URLs, in upload order
    pub gallery_images: Vec<String>,
    /// Number of events hosted (read-only aggregate)
    pub events_hosted: i64,
    /// Average review rating (read-only aggregate)
    pub average_rating: f64,
    /// Number of reviews (read-only aggregate)
    pub total_reviews: i64,
}

impl HostProfile {
    /// Transient profile returned when the user has never saved one
    #[must_use]
    pub fn default_for(user: &User, placeholder_picture_url: &str) -> Self {
        Self {
            id: None,
            user_id: user.id,
            company_organization: Some(user.username.clone()),
            contact_person: Some(String::new()),
            contact_number: Some(String::new()),
            location: Some(NOT_SET.to_owned()),
            event_types_typically_hosted: Vec::new(),
            bio: Some(String::new()),
            default_budget_range_min: Decimal::ZERO,
            default_budget_range_max: Decimal::ZERO,
            preferred_performer_types: Vec::new(),
            preferred_locations_for_gigs: Vec::new(),
            urgent_booking_enabled: false,
            email_notifications_enabled: false,
            sms_notifications_enabled: false,
            profile_picture_url: Some(placeholder_picture_url.to_owned()),
            gallery_images: Vec::new(),
            events_hosted: 0,
            average_rating: 0.0,
            total_reviews: 0,
        }
    }
}
