// ABOUTME: RAII transaction guard for SQLite writes
// ABOUTME: Commits explicitly; rolls back and returns the connection when dropped uncommitted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::error;

use crate::errors::{AppError, AppResult};

/// Owns an open transaction until `commit` is called
///
/// Dropping the guard without committing (an early `?` return, a panic, a
/// cancelled future) rolls the transaction back and releases the pooled
/// connection.
pub struct TransactionGuard {
    tx: Option<Transaction<'static, Sqlite>>,
    operation: &'static str,
}

impl TransactionGuard {
    /// Check a connection out of the pool and open a transaction
    ///
    /// # Errors
    ///
    /// Returns a database error if no connection can be acquired in time or
    /// the transaction cannot be started
    pub async fn begin(pool: &SqlitePool, operation: &'static str) -> AppResult<Self> {
        let tx = pool.begin().await.map_err(|e| {
            AppError::database(format!("Failed to begin transaction for {operation}: {e}"))
        })?;
        Ok(Self {
            tx: Some(tx),
            operation,
        })
    }

    /// Connection to run statements on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an internal error if the transaction was already finished
    pub fn executor(&mut self) -> AppResult<&mut SqliteConnection> {
        let operation = self.operation;
        self.tx.as_deref_mut().ok_or_else(|| {
            AppError::internal(format!("Transaction for {operation} already finished"))
        })
    }

    /// Commit and release the connection
    ///
    /// # Errors
    ///
    /// Returns a database error if the commit fails (the transaction is then
    /// rolled back by `SQLite`)
    pub async fn commit(mut self) -> AppResult<()> {
        let operation = self.operation;
        let tx = self.tx.take().ok_or_else(|| {
            AppError::internal(format!("Transaction for {operation} already finished"))
        })?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit {operation}: {e}")))
    }
}

impl Drop for TransactionGuard {
    fn drop(&mut self) {
        if self.tx.take().is_some() {
            error!(operation = self.operation, "transaction rolled back");
        }
    }
}
