// ABOUTME: Performer profile fetch, public listing and atomic create-or-update
// ABOUTME: Image references are persisted storage-relative and resolved to absolute URLs on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use chrono::Utc;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{query::Query, Row, Sqlite};
use tracing::{debug, info, warn};

use super::{decode_list, encode_list, flag_column, ProfileLookup, UpsertOutcome};
use crate::constants::fields::{self, performer as performer_fields};
use crate::constants::placeholders::PERFORMER_PROFILE_PICTURE;
use crate::database::{Database, TransactionGuard};
use crate::errors::{AppError, AppResult};
use crate::forms::multipart::FileField;
use crate::forms::{coercion, ProfileForm};
use crate::images::ImageUrlResolver;
use crate::models::{PerformerProfile, UserId};

/// What an upsert does to the stored profile picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageChange {
    /// Leave the stored reference as it is
    Keep,
    /// Store this storage-relative path (`None` removes the picture)
    Replace(Option<String>),
}

impl ImageChange {
    fn replaces(&self) -> bool {
        matches!(self, Self::Replace(_))
    }

    fn path(&self) -> Option<&str> {
        match self {
            Self::Keep | Self::Replace(None) => None,
            Self::Replace(Some(path)) => Some(path),
        }
    }
}

/// Coerced performer profile write set
///
/// Image references are storage-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerProfileUpdate {
    /// Legal or full name
    pub full_name: Option<String>,
    /// Stage name
    pub stage_name: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Kind of performance
    pub performance_type: Option<String>,
    /// Free-text bio
    pub bio: Option<String>,
    /// Human-readable price range
    pub price: Option<String>,
    /// Skill tags
    pub skills: Vec<String>,
    /// Profile picture change
    pub profile_picture: ImageChange,
    /// Contact phone number
    pub contact_number: Option<String>,
    /// Accepts direct bookings
    pub direct_booking: bool,
    /// Maximum travel distance in kilometres (never negative)
    pub travel_distance: i64,
    /// Available on weekdays
    pub availability_weekdays: bool,
    /// Available on weekends
    pub availability_weekends: bool,
    /// Available in the morning
    pub availability_morning: bool,
    /// Available in the evening
    pub availability_evening: bool,
    /// Storage-relative gallery paths, kept client entries first then new uploads
    pub gallery_images: Vec<String>,
}

impl PerformerProfileUpdate {
    /// Multipart fields that may carry files
    pub const FILE_FIELDS: &'static [FileField] = &[
        FileField::single(fields::PROFILE_PICTURE),
        FileField::many(performer_fields::GALLERY_IMAGES),
    ];

    /// Coerce a submitted form
    ///
    /// Profile picture precedence: a newly uploaded `profile_picture`, then a
    /// present `profile_picture_url` (empty or null removes the picture, a URL
    /// is mapped to its stored path), otherwise the stored picture is kept.
    /// Client gallery URLs that do not map to a stored path are dropped; new
    /// `gallery_images` uploads are appended in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if a flag or list cannot be parsed
    pub fn from_form(form: &ProfileForm, resolver: &ImageUrlResolver) -> AppResult<Self> {
        let text = |name: &str| coercion::optional_text(name, form.field(name));
        let list = |name: &str| coercion::string_list(name, form.field(name));
        let flag = |name: &str| coercion::flag(name, form.field(name));

        let profile_picture = if let Some(upload) = form.first_file(fields::PROFILE_PICTURE) {
            ImageChange::Replace(Some(ImageUrlResolver::upload_path(&upload.filename)))
        } else if form.has_field(fields::PROFILE_PICTURE_URL) {
            let client = text(fields::PROFILE_PICTURE_URL)?.unwrap_or_default();
            let stored = resolver.to_relative(&client);
            if stored.is_none() && !client.trim().is_empty() {
                warn!(url = %client, "profile picture URL does not resolve, clearing it");
            }
            ImageChange::Replace(stored)
        } else {
            ImageChange::Keep
        };

        let normalization = resolver.gallery_to_relative(&list(performer_fields::GALLERY_IMAGES)?);
        if !normalization.dropped.is_empty() {
            warn!(
                dropped = normalization.dropped.len(),
                "dropped unresolvable gallery image references"
            );
        }
        let mut gallery_images = normalization.kept;
        gallery_images.extend(
            form.files(performer_fields::GALLERY_IMAGES)
                .iter()
                .map(|upload| ImageUrlResolver::upload_path(&upload.filename)),
        );

        Ok(Self {
            full_name: text(performer_fields::FULL_NAME)?,
            stage_name: text(performer_fields::STAGE_NAME)?,
            location: text(performer_fields::LOCATION)?,
            performance_type: text(performer_fields::PERFORMANCE_TYPE)?,
            bio: text(performer_fields::BIO)?,
            price: text(performer_fields::PRICE)?,
            skills: list(performer_fields::SKILLS)?,
            profile_picture,
            contact_number: text(performer_fields::CONTACT_NUMBER)?,
            direct_booking: flag(performer_fields::DIRECT_BOOKING)?,
            travel_distance: coercion::non_negative_integer(
                performer_fields::TRAVEL_DISTANCE,
                form.field(performer_fields::TRAVEL_DISTANCE),
            ),
            availability_weekdays: flag(performer_fields::AVAILABILITY_WEEKDAYS)?,
            availability_weekends: flag(performer_fields::AVAILABILITY_WEEKENDS)?,
            availability_morning: flag(performer_fields::AVAILABILITY_MORNING)?,
            availability_evening: flag(performer_fields::AVAILABILITY_EVENING)?,
            gallery_images,
        })
    }

    fn encode(&self) -> AppResult<PerformerColumns> {
        Ok(PerformerColumns {
            skills: encode_list("skills", &self.skills)?,
            gallery: encode_list("gallery_images", &self.gallery_images)?,
            now: Utc::now().to_rfc3339(),
        })
    }
}

struct PerformerColumns {
    skills: String,
    gallery: String,
    now: String,
}

/// Bind `$1..$19` shared by the insert and update statements
///
/// `$10` tells the update whether to replace the picture with `$11`.
fn bind_performer_columns<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    user_id: UserId,
    update: &'q PerformerProfileUpdate,
    columns: &'q PerformerColumns,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(user_id)
        .bind(&update.full_name)
        .bind(&update.stage_name)
        .bind(&update.location)
        .bind(&update.performance_type)
        .bind(&update.bio)
        .bind(&update.price)
        .bind(&columns.skills)
        .bind(&update.contact_number)
        .bind(update.profile_picture.replaces())
        .bind(update.profile_picture.path())
        .bind(flag_column(update.direct_booking))
        .bind(update.travel_distance.max(0))
        .bind(flag_column(update.availability_weekdays))
        .bind(flag_column(update.availability_weekends))
        .bind(flag_column(update.availability_morning))
        .bind(flag_column(update.availability_evening))
        .bind(&columns.gallery)
        .bind(&columns.now)
}

/// Performer profile database operations manager
#[derive(Clone)]
pub struct PerformerProfileManager {
    database: Database,
    resolver: ImageUrlResolver,
}

impl PerformerProfileManager {
    /// Create a new performer profile manager
    #[must_use]
    pub const fn new(database: Database, resolver: ImageUrlResolver) -> Self {
        Self { database, resolver }
    }

    /// Fetch a user's performer profile, or a default view if none was saved
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, a database error
    /// if the query fails, or an internal error if a stored list is corrupt
    pub async fn fetch(&self, user_id: UserId) -> AppResult<ProfileLookup<PerformerProfile>> {
        let user = self.database.require_user(user_id).await?;

        let row = sqlx::query("SELECT * FROM performer_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.database.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch performer profile: {e}")))?;

        match row {
            Some(row) => Ok(ProfileLookup {
                profile: self.row_to_performer_profile(&row)?,
                is_default: false,
            }),
            None => {
                debug!(user_id, "no performer profile, returning default");
                Ok(ProfileLookup {
                    profile: PerformerProfile::default_for(&user, PERFORMER_PROFILE_PICTURE),
                    is_default: true,
                })
            }
        }
    }

    /// List every saved performer profile, ordered by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails, or an internal error if a
    /// stored list is corrupt
    pub async fn list_all(&self) -> AppResult<Vec<PerformerProfile>> {
        let rows = sqlx::query("SELECT * FROM performer_profiles ORDER BY id")
            .fetch_all(self.database.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list performer profiles: {e}")))?;

        rows.iter()
            .map(|row| self.row_to_performer_profile(row))
            .collect()
    }

    /// Create or update a user's performer profile from a submitted form
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, an invalid-input
    /// error for unparsable fields, or a database error if the transaction fails
    pub async fn upsert(&self, user_id: UserId, form: &ProfileForm) -> AppResult<UpsertOutcome> {
        let update = PerformerProfileUpdate::from_form(form, &self.resolver)?;
        self.upsert_update(user_id, &update).await
    }

    /// Create or update a user's performer profile from an already-coerced write set
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, or a database
    /// error if the transaction fails (nothing is written in that case)
    pub async fn upsert_update(
        &self,
        user_id: UserId,
        update: &PerformerProfileUpdate,
    ) -> AppResult<UpsertOutcome> {
        self.database.require_user(user_id).await?;
        let columns = update.encode()?;

        let mut guard =
            TransactionGuard::begin(self.database.pool(), "performer profile upsert").await?;

        let inserted = bind_performer_columns(
            sqlx::query(
                r"
                INSERT INTO performer_profiles (
                    user_id, full_name, stage_name, location, performance_type, bio,
                    price_display, skills, contact_number, profile_picture_url,
                    accept_direct_booking, travel_distance_km,
                    preferred_availability_weekdays, preferred_availability_weekends,
                    preferred_availability_mornings, preferred_availability_evenings,
                    gallery_images, average_rating, total_reviews, created_at, updated_at
                ) VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, CASE WHEN $10 THEN $11 ELSE NULL END,
                    $12, $13, $14, $15, $16, $17, $18, 0, 0, $19, $19
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
        .map_err(|e| AppError::database(format!("Failed to insert performer profile: {e}")))?
        .rows_affected();

        let outcome = if inserted == 1 {
            UpsertOutcome::Created
        } else {
            bind_performer_columns(
                sqlx::query(
                    r"
                    UPDATE performer_profiles SET
                        full_name = $2, stage_name = $3, location = $4, performance_type = $5,
                        bio = $6, price_display = $7, skills = $8, contact_number = $9,
                        profile_picture_url = CASE WHEN $10 THEN $11 ELSE profile_picture_url END,
                        accept_direct_booking = $12, travel_distance_km = $13,
                        preferred_availability_weekdays = $14,
                        preferred_availability_weekends = $15,
                        preferred_availability_mornings = $16,
                        preferred_availability_evenings = $17,
                        gallery_images = $18, updated_at = $19
                    WHERE user_id = $1
                    ",
                ),
                user_id,
                update,
                &columns,
            )
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to update performer profile: {e}")))?;
            UpsertOutcome::Updated
        };

        guard.commit().await?;
        info!(user_id, outcome = ?outcome, "performer profile saved");
        Ok(outcome)
    }

    /// Render a stored row with absolute image URLs
    fn row_to_performer_profile(&self, row: &SqliteRow) -> AppResult<PerformerProfile> {
        let picture: Option<String> = row.get("profile_picture_url");
        let gallery = decode_list("gallery_images", row.get("gallery_images"))?;

        Ok(PerformerProfile {
            id: row.get("id"),
            user_id: row.get("user_id"),
            full_name: row.get("full_name"),
            stage_name: row.get("stage_name"),
            location: row.get("location"),
            performance_type: row.get("performance_type"),
            bio: row.get("bio"),
            price: row.get("price_display"),
            skills: decode_list("skills", row.get("skills"))?,
            profile_picture_url: self.resolver.to_absolute(picture.as_deref()),
            contact_number: row.get("contact_number"),
            direct_booking: row.get::<i64, _>("accept_direct_booking") != 0,
            travel_distance: row.get("travel_distance_km"),
            availability_weekdays: row.get::<i64, _>("preferred_availability_weekdays") != 0,
            availability_weekends: row.get::<i64, _>("preferred_availability_weekends") != 0,
            availability_morning: row.get::<i64, _>("preferred_availability_mornings") != 0,
            availability_evening: row.get::<i64, _>("preferred_availability_evenings") != 0,
            gallery_images: self.resolver.gallery_to_absolute(&gallery),
            rating: row.get("average_rating"),
            review_count: row.get("total_reviews"),
        })
    }
}
