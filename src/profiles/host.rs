// ABOUTME: Host profile fetch and atomic create-or-update against the host_profiles table
// ABOUTME: Own-origin image references are stored relative; foreign URLs are kept verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{query::Query, Row, Sqlite};
use tracing::{debug, info};

use super::{decode_list, encode_list, flag_column, ProfileLookup, UpsertOutcome};
use crate::constants::fields::{self, host as host_fields};
use crate::constants::placeholders::HOST_PROFILE_PICTURE;
use crate::database::{Database, TransactionGuard};
use crate::errors::{AppError, AppResult};
use crate::forms::multipart::FileField;
use crate::forms::{coercion, ProfileForm};
use crate::images::ImageUrlResolver;
use crate::models::{HostProfile, UserId};

/// Coerced host profile write set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfileUpdate {
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
    /// Stored profile picture reference
    pub profile_picture_url: Option<String>,
    /// Stored gallery references, existing entries first then new uploads
    pub gallery_images: Vec<String>,
}

impl HostProfileUpdate {
    /// Multipart fields that may carry files
    pub const FILE_FIELDS: &'static [FileField] = &[
        FileField::single(fields::PROFILE_PICTURE),
        FileField::many(host_fields::NEW_GALLERY_IMAGES),
    ];

    /// Coerce a submitted form
    ///
    /// A newly uploaded `profile_picture` wins over `profile_picture_url`.
    /// Newly uploaded `new_gallery_images` are appended after the client's
    /// `existing_gallery_images`, in arrival order. Client references are
    /// trusted: own-origin URLs become stored paths, other `http(s)` URLs are
    /// kept as sent, and only blank or `blob:` entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if a flag, list or budget cannot be parsed
    pub fn from_form(form: &ProfileForm, resolver: &ImageUrlResolver) -> AppResult<Self> {
        let text = |name: &str| coercion::optional_text(name, form.field(name));
        let list = |name: &str| coercion::string_list(name, form.field(name));
        let flag = |name: &str| coercion::flag(name, form.field(name));
        let decimal = |name: &str| coercion::decimal(name, form.field(name));

        let profile_picture_url = match form.first_file(fields::PROFILE_PICTURE) {
            Some(upload) => Some(ImageUrlResolver::upload_path(&upload.filename)),
            None => text(fields::PROFILE_PICTURE_URL)?.and_then(|url| resolver.to_stored(&url)),
        };

        let mut gallery_images: Vec<String> = list(host_fields::EXISTING_GALLERY_IMAGES)?
            .iter()
            .filter_map(|entry| resolver.to_stored(entry))
            .collect();
        gallery_images.extend(
            form.files(host_fields::NEW_GALLERY_IMAGES)
                .iter()
                .map(|upload| ImageUrlResolver::upload_path(&upload.filename)),
        );

        Ok(Self {
            company_organization: text(host_fields::COMPANY_ORGANIZATION)?,
            contact_person: text(host_fields::CONTACT_PERSON)?,
            contact_number: text(host_fields::CONTACT_NUMBER)?,
            location: text(host_fields::LOCATION)?,
            event_types_typically_hosted: list(host_fields::EVENT_TYPES)?,
            bio: text(host_fields::BIO)?,
            default_budget_range_min: decimal(host_fields::BUDGET_MIN)?,
            default_budget_range_max: decimal(host_fields::BUDGET_MAX)?,
            preferred_performer_types: list(host_fields::PREFERRED_PERFORMER_TYPES)?,
            preferred_locations_for_gigs: list(host_fields::PREFERRED_LOCATIONS)?,
            urgent_booking_enabled: flag(host_fields::URGENT_BOOKING)?,
            email_notifications_enabled: flag(host_fields::EMAIL_NOTIFICATIONS)?,
            sms_notifications_enabled: flag(host_fields::SMS_NOTIFICATIONS)?,
            profile_picture_url,
            gallery_images,
        })
    }

    fn encode(&self) -> AppResult<HostColumns> {
        Ok(HostColumns {
            event_types: encode_list(
                "event_types_typically_hosted",
                &self.event_types_typically_hosted,
            )?,
            budget_min: self.default_budget_range_min.to_string(),
            budget_max: self.default_budget_range_max.to_string(),
            performer_types: encode_list(
                "preferred_performer_types",
                &self.preferred_performer_types,
            )?,
            locations: encode_list(
                "preferred_locations_for_gigs",
                &self.preferred_locations_for_gigs,
            )?,
            gallery: encode_list("gallery_images", &self.gallery_images)?,
            now: Utc::now().to_rfc3339(),
        })
    }
}

/// Text encodings of the multi-value and decimal columns
struct HostColumns {
    event_types: String,
    budget_min: String,
    budget_max: String,
    performer_types: String,
    locations: String,
    gallery: String,
    now: String,
}

/// Bind `$1..$17` shared by the insert and update statements
fn bind_host_columns<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    user_id: UserId,
    update: &'q HostProfileUpdate,
    columns: &'q HostColumns,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(user_id)
        .bind(&update.company_organization)
        .bind(&update.contact_person)
        .bind(&update.contact_number)
        .bind(&update.location)
        .bind(&columns.event_types)
        .bind(&update.bio)
        .bind(&columns.budget_min)
        .bind(&columns.budget_max)
        .bind(&columns.performer_types)
        .bind(&columns.locations)
        .bind(flag_column(update.urgent_booking_enabled))
        .bind(flag_column(update.email_notifications_enabled))
        .bind(flag_column(update.sms_notifications_enabled))
        .bind(&update.profile_picture_url)
        .bind(&columns.gallery)
        .bind(&columns.now)
}

/// Host profile database operations manager
#[derive(Clone)]
pub struct HostProfileManager {
    database: Database,
    resolver: ImageUrlResolver,
}

impl HostProfileManager {
    /// Create a new host profile manager
    #[must_use]
    pub const fn new(database: Database, resolver: ImageUrlResolver) -> Self {
        Self { database, resolver }
    }

    /// Fetch a user's host profile, or a default view if none was saved
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, a database error
    /// if the query fails, or an internal error if a stored list is corrupt
    pub async fn fetch(&self, user_id: UserId) -> AppResult<ProfileLookup<HostProfile>> {
        let user = self.database.require_user(user_id).await?;

        let row = sqlx::query("SELECT * FROM host_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.database.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch host profile: {e}")))?;

        match row {
            Some(row) => Ok(ProfileLookup {
                profile: self.row_to_host_profile(&row)?,
                is_default: false,
            }),
            None => {
                debug!(user_id, "no host profile, returning default");
                Ok(ProfileLookup {
                    profile: HostProfile::default_for(&user, HOST_PROFILE_PICTURE),
                    is_default: true,
                })
            }
        }
    }

    /// Create or update a user's host profile from a submitted form
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, an invalid-input
    /// error for unparsable fields, or a database error if the transaction fails
    pub async fn upsert(&self, user_id: UserId, form: &ProfileForm) -> AppResult<UpsertOutcome> {
        let update = HostProfileUpdate::from_form(form, &self.resolver)?;
        self.upsert_update(user_id, &update).await
    }

    /// Create or update a user's host profile from an already-coerced write set
    ///
    /// Read-only aggregates are seeded to zero on insert and never touched by
    /// the update.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, or a database
    /// error if the transaction fails (nothing is written in that case)
    pub async fn upsert_update(
        &self,
        user_id: UserId,
        update: &HostProfileUpdate,
    ) -> AppResult<UpsertOutcome> {
        self.database.require_user(user_id).await?;
        let columns = update.encode()?;

        let mut guard =
            TransactionGuard::begin(self.database.pool(), "host profile upsert").await?;

        let inserted = bind_host_columns(
            sqlx::query(
                r"
                INSERT INTO host_profiles (
                    user_id, company_organization, contact_person, contact_number, location,
                    event_types_typically_hosted, bio, default_budget_range_min,
                    default_budget_range_max, preferred_performer_types,
                    preferred_locations_for_gigs, urgent_booking_enabled,
                    email_notifications_enabled, sms_notifications_enabled,
                    profile_picture_url, gallery_images,
                    events_hosted, average_rating, total_reviews, created_at, updated_at
                ) VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    0, 0, 0, $17, $17
                )
                ON CONFLICT(user_id) DO NOTHING
                ",
            ),
            user_id,
            update,
            &columns,
        )
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert host profile: {e}")))?
        .rows_affected();

        let outcome = if inserted == 1 {
            UpsertOutcome::Created
        } else {
            bind_host_columns(
                sqlx::query(
                    r"
                    UPDATE host_profiles SET
                        company_organization = $2, contact_person = $3, contact_number = $4,
                        location = $5, event_types_typically_hosted = $6, bio = $7,
                        default_budget_range_min = $8, default_budget_range_max = $9,
                        preferred_performer_types = $10, preferred_locations_for_gigs = $11,
                        urgent_booking_enabled = $12, email_notifications_enabled = $13,
                        sms_notifications_enabled = $14, profile_picture_url = $15,
                        gallery_images = $16, updated_at = $17
                    WHERE user_id = $1
                    ",
                ),
                user_id,
                update,
                &columns,
            )
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to update host profile: {e}")))?;
            UpsertOutcome::Updated
        };

        guard.commit().await?;
        info!(user_id, outcome = ?outcome, "host profile saved");
        Ok(outcome)
    }

    /// Render a stored row with absolute image URLs
    fn row_to_host_profile(&self, row: &SqliteRow) -> AppResult<HostProfile> {
        let picture: Option<String> = row.get("profile_picture_url");
        let gallery = decode_list("gallery_images", row.get("gallery_images"))?;

        Ok(HostProfile {
            id: row.get("id"),
            user_id: row.get("user_id"),
            company_organization: row.get("company_organization"),
            contact_person: row.get("contact_person"),
            contact_number: row.get("contact_number"),
            location: row.get("location"),
            event_types_typically_hosted: decode_list(
                "event_types_typically_hosted",
                row.get("event_types_typically_hosted"),
            )?,
            bio: row.get("bio"),
            default_budget_range_min: decode_decimal(
                "default_budget_range_min",
                row.get("default_budget_range_min"),
            )?,
            default_budget_range_max: decode_decimal(
                "default_budget_range_max",
                row.get("default_budget_range_max"),
            )?,
            preferred_performer_types: decode_list(
                "preferred_performer_types",
                row.get("preferred_performer_types"),
            )?,
            preferred_locations_for_gigs: decode_list(
                "preferred_locations_for_gigs",
                row.get("preferred_locations_for_gigs"),
            )?,
            urgent_booking_enabled: row.get::<i64, _>("urgent_booking_enabled") != 0,
            email_notifications_enabled: row.get::<i64, _>("email_notifications_enabled") != 0,
            sms_notifications_enabled: row.get::<i64, _>("sms_notifications_enabled") != 0,
            profile_picture_url: self.resolver.to_absolute(picture.as_deref()),
            gallery_images: self.resolver.gallery_to_absolute(&gallery),
            events_hosted: row.get("events_hosted"),
            average_rating: row.get("average_rating"),
            total_reviews: row.get("total_reviews"),
        })
    }
}

fn decode_decimal(column: &str, raw: Option<String>) -> AppResult<Decimal> {
    match raw {
        Some(text) if !text.trim().is_empty() => Decimal::from_str(text.trim())
            .or_else(|_| Decimal::from_scientific(text.trim()))
            .map_err(|e| AppError::internal(format!("Corrupt {column} column: {e}"))),
        _ => Ok(Decimal::ZERO),
    }
}
