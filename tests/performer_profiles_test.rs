// ABOUTME: Integration tests for performer profile fetch, listing and upsert
// ABOUTME: Relative image storage, picture keep/replace rules, gallery filtering and travel distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    create_test_database, create_test_user, performer_manager, profile_row_count, stored_upload,
    test_resolver, TEST_BASE_URL,
};
use gigs_backend::constants::placeholders::PERFORMER_PROFILE_PICTURE;
use gigs_backend::database::Database;
use gigs_backend::errors::ErrorCode;
use gigs_backend::forms::ProfileForm;
use gigs_backend::models::performer::{DEFAULT_PERFORMER_BIO, DEFAULT_PRICE_DISPLAY};
use gigs_backend::models::UserRole;
use gigs_backend::profiles::{ImageChange, PerformerProfileUpdate, UpsertOutcome};
use serde_json::json;

fn basic_performer_form() -> ProfileForm {
    ProfileForm::new()
        .with_field("full_name", "Nadeesha Perera")
        .with_field("stage_name", "DJ Nadz")
        .with_field("location", "Kandy")
        .with_field("performance_type", "DJ")
        .with_field("bio", "Open format DJ")
        .with_field("price", "Rs. 20000 - Rs. 50000")
        .with_field("skills", r#"["House","Baila"]"#)
        .with_field("contact_number", "0771234567")
        .with_field("direct_booking", "true")
        .with_field("travel_distance", "40")
        .with_field("availability_weekdays", "0")
        .with_field("availability_weekends", "1")
        .with_field("availability_morning", "false")
        .with_field("availability_evening", "true")
}

async fn stored_picture(database: &Database, user_id: i64) -> Option<String> {
    sqlx::query_scalar("SELECT profile_picture_url FROM performer_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(database.pool())
        .await
        .unwrap()
}

async fn stored_gallery(database: &Database, user_id: i64) -> Vec<String> {
    let raw: String =
        sqlx::query_scalar("SELECT gallery_images FROM performer_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(database.pool())
            .await
            .unwrap();
    serde_json::from_str(&raw).unwrap()
}

// ============================================================================
// Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_missing_profile_returns_default_view() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let lookup = manager.fetch(user.id).await.unwrap();

    assert!(lookup.is_default);
    let profile = lookup.profile;
    assert_eq!(profile.id, None);
    assert_eq!(profile.full_name.as_deref(), Some(user.username.as_str()));
    assert_eq!(profile.stage_name.as_deref(), Some(user.username.as_str()));
    assert_eq!(profile.location.as_deref(), Some("Not Set"));
    assert_eq!(profile.performance_type.as_deref(), Some("Not Set"));
    assert_eq!(profile.bio.as_deref(), Some(DEFAULT_PERFORMER_BIO));
    assert_eq!(profile.price.as_deref(), Some(DEFAULT_PRICE_DISPLAY));
    assert_eq!(
        profile.profile_picture_url.as_deref(),
        Some(PERFORMER_PROFILE_PICTURE)
    );
    assert!(profile.skills.is_empty());
    assert!(profile.gallery_images.is_empty());
    assert!(!profile.direct_booking);
    assert_eq!(profile.travel_distance, 0);

    assert_eq!(
        profile_row_count(&database, "performer_profiles", user.id).await,
        0
    );
}

#[tokio::test]
async fn test_fetch_unknown_user_is_not_found() {
    let database = create_test_database().await.unwrap();
    let err = performer_manager(&database).fetch(999).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

// ============================================================================
// Upsert
// ============================================================================

#[tokio::test]
async fn test_upsert_creates_then_updates_single_row() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let first = manager.upsert(user.id, &basic_performer_form()).await.unwrap();
    let second = manager
        .upsert(user.id, &basic_performer_form().with_field("stage_name", "Nadz"))
        .await
        .unwrap();

    assert_eq!(first, UpsertOutcome::Created);
    assert_eq!(second, UpsertOutcome::Updated);
    assert_eq!(
        profile_row_count(&database, "performer_profiles", user.id).await,
        1
    );

    let profile = manager.fetch(user.id).await.unwrap().profile;
    assert_eq!(profile.stage_name.as_deref(), Some("Nadz"));
    assert_eq!(profile.skills, vec!["House", "Baila"]);
    assert!(profile.direct_booking);
    assert_eq!(profile.travel_distance, 40);
    assert!(!profile.availability_weekdays);
    assert!(profile.availability_weekends);
    assert!(!profile.availability_morning);
    assert!(profile.availability_evening);
}

#[tokio::test]
async fn test_uploads_are_stored_relative_and_served_absolute() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let form = basic_performer_form()
        .with_file(stored_upload("profile_picture", "profile_picture-p1.png"))
        .with_file(stored_upload("gallery_images", "gallery_images-g1.jpg"))
        .with_file(stored_upload("gallery_images", "gallery_images-g2.jpg"));
    manager.upsert(user.id, &form).await.unwrap();

    assert_eq!(
        stored_picture(&database, user.id).await.as_deref(),
        Some("/uploads/profile_picture-p1.png")
    );
    assert_eq!(
        stored_gallery(&database, user.id).await,
        vec!["/uploads/gallery_images-g1.jpg", "/uploads/gallery_images-g2.jpg"]
    );

    let profile = manager.fetch(user.id).await.unwrap().profile;
    assert_eq!(
        profile.profile_picture_url,
        Some(format!("{TEST_BASE_URL}/uploads/profile_picture-p1.png"))
    );
    assert_eq!(
        profile.gallery_images,
        vec![
            format!("{TEST_BASE_URL}/uploads/gallery_images-g1.jpg"),
            format!("{TEST_BASE_URL}/uploads/gallery_images-g2.jpg"),
        ]
    );
}

#[tokio::test]
async fn test_absent_picture_field_keeps_stored_picture() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let with_picture =
        basic_performer_form().with_file(stored_upload("profile_picture", "profile_picture-keep.png"));
    manager.upsert(user.id, &with_picture).await.unwrap();

    manager
        .upsert(user.id, &basic_performer_form().with_field("bio", "New bio"))
        .await
        .unwrap();

    assert_eq!(
        stored_picture(&database, user.id).await.as_deref(),
        Some("/uploads/profile_picture-keep.png")
    );
}

#[tokio::test]
async fn test_empty_picture_url_removes_picture() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let with_picture =
        basic_performer_form().with_file(stored_upload("profile_picture", "profile_picture-x.png"));
    manager.upsert(user.id, &with_picture).await.unwrap();

    manager
        .upsert(
            user.id,
            &basic_performer_form().with_field("profile_picture_url", ""),
        )
        .await
        .unwrap();

    assert_eq!(stored_picture(&database, user.id).await, None);
    let profile = manager.fetch(user.id).await.unwrap().profile;
    assert_eq!(profile.profile_picture_url, None);
}

#[tokio::test]
async fn test_picture_url_of_own_origin_is_stored_as_path() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let form = basic_performer_form().with_field(
        "profile_picture_url",
        format!("{TEST_BASE_URL}/uploads/profile_picture-own.png"),
    );
    manager.upsert(user.id, &form).await.unwrap();

    assert_eq!(
        stored_picture(&database, user.id).await.as_deref(),
        Some("/uploads/profile_picture-own.png")
    );
}

#[tokio::test]
async fn test_gallery_drops_blob_and_foreign_entries_then_appends_uploads() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let client_gallery = json!([
        format!("{TEST_BASE_URL}/uploads/kept-1.jpg"),
        "blob:http://localhost:3000/0b5e",
        "https://cdn.example.com/elsewhere.jpg",
        "/uploads/kept-2.jpg",
    ]);
    let form = basic_performer_form()
        .with_field("gallery_images", client_gallery.to_string())
        .with_file(stored_upload("gallery_images", "gallery_images-new.jpg"));
    manager.upsert(user.id, &form).await.unwrap();

    assert_eq!(
        stored_gallery(&database, user.id).await,
        vec![
            "/uploads/kept-1.jpg",
            "/uploads/kept-2.jpg",
            "/uploads/gallery_images-new.jpg"
        ]
    );
}

#[tokio::test]
async fn test_gallery_list_round_trips_in_order_fully_qualified() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let form = basic_performer_form().with_field("gallery_images", r#"["a.jpg","b.jpg"]"#);
    manager.upsert(user.id, &form).await.unwrap();

    assert_eq!(stored_gallery(&database, user.id).await, vec!["a.jpg", "b.jpg"]);
    let profile = manager.fetch(user.id).await.unwrap().profile;
    assert_eq!(
        profile.gallery_images,
        vec![
            format!("{TEST_BASE_URL}/a.jpg"),
            format!("{TEST_BASE_URL}/b.jpg"),
        ]
    );
}

#[tokio::test]
async fn test_negative_or_garbled_travel_distance_is_zero() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    manager
        .upsert(
            user.id,
            &basic_performer_form().with_field("travel_distance", "-25"),
        )
        .await
        .unwrap();
    assert_eq!(manager.fetch(user.id).await.unwrap().profile.travel_distance, 0);

    manager
        .upsert(
            user.id,
            &basic_performer_form().with_field("travel_distance", "60km"),
        )
        .await
        .unwrap();
    assert_eq!(manager.fetch(user.id).await.unwrap().profile.travel_distance, 60);
}

#[tokio::test]
async fn test_invalid_flag_is_rejected() {
    let database = create_test_database().await.unwrap();
    let user = create_test_user(&database, UserRole::Performer).await.unwrap();
    let manager = performer_manager(&database);

    let err = manager
        .upsert(
            user.id,
            &basic_performer_form().with_field("direct_booking", "sometimes"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(
        profile_row_count(&database, "performer_profiles", user.id).await,
        0
    );
}

// ============================================================================
// Form coercion
// ============================================================================

#[test]
fn test_picture_change_precedence() {
    let resolver = test_resolver();

    let keep = PerformerProfileUpdate::from_form(&ProfileForm::new(), &resolver).unwrap();
    assert_eq!(keep.profile_picture, ImageChange::Keep);

    let cleared = PerformerProfileUpdate::from_form(
        &ProfileForm::new().with_field("profile_picture_url", "blob:http://localhost/abc"),
        &resolver,
    )
    .unwrap();
    assert_eq!(cleared.profile_picture, ImageChange::Replace(None));

    let nulled = PerformerProfileUpdate::from_form(
        &ProfileForm::from_json(json!({ "profile_picture_url": null })).unwrap(),
        &resolver,
    )
    .unwrap();
    assert_eq!(nulled.profile_picture, ImageChange::Replace(None));

    let uploaded = PerformerProfileUpdate::from_form(
        &ProfileForm::new()
            .with_field("profile_picture_url", "/uploads/old.png")
            .with_file(stored_upload("profile_picture", "profile_picture-new.png")),
        &resolver,
    )
    .unwrap();
    assert_eq!(
        uploaded.profile_picture,
        ImageChange::Replace(Some("/uploads/profile_picture-new.png".to_owned()))
    );
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_all_returns_saved_profiles_in_id_order() {
    let database = create_test_database().await.unwrap();
    let manager = performer_manager(&database);

    assert!(manager.list_all().await.unwrap().is_empty());

    let first = create_test_user(&database, UserRole::Performer).await.unwrap();
    let second = create_test_user(&database, UserRole::Performer).await.unwrap();
    let unsaved = create_test_user(&database, UserRole::Performer).await.unwrap();

    manager
        .upsert(second.id, &basic_performer_form().with_field("stage_name", "Second"))
        .await
        .unwrap();
    manager
        .upsert(
            first.id,
            &basic_performer_form()
                .with_field("stage_name", "First")
                .with_file(stored_upload("gallery_images", "gallery_images-l.jpg")),
        )
        .await
        .unwrap();

    let profiles = manager.list_all().await.unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].user_id, second.id);
    assert_eq!(profiles[1].user_id, first.id);
    assert!(profiles.iter().all(|p| p.user_id != unsaved.id));
    assert_eq!(
        profiles[1].gallery_images,
        vec![format!("{TEST_BASE_URL}/uploads/gallery_images-l.jpg")]
    );
}
