// ABOUTME: User account database operations
// ABOUTME: Lookups used by the profile managers plus account creation for the CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserId, UserRole};

impl Database {
    /// Create a user account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already in use
    /// - Database operation fails
    pub async fn create_user(&self, username: &str, email: &str, role: UserRole) -> AppResult<User> {
        if self.get_user_by_email(email).await?.is_some() {
            return Err(AppError::invalid_input(format!(
                "Email already in use: {email}"
            )));
        }

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (username, email, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(username)
        .bind(email)
        .bind(role.as_str())
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(User {
            id,
            username: username.to_owned(),
            email: email.to_owned(),
            role,
        })
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, username, email, role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user {user_id}: {e}")))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, username, email, role FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Get a user by id, failing with the client-facing not-found error
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist, or a database
    /// error if the query fails
    pub async fn require_user(&self, user_id: UserId) -> AppResult<User> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(crate::constants::messages::USER_NOT_FOUND))
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let role: String = row.get("role");
        Ok(User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            role: role
                .parse()
                .map_err(|e| AppError::internal(format!("Failed to parse user role: {e}")))?,
        })
    }
}
