//! Storage layer for Brickline registration intake.
//!
//! This crate defines the [`RegistrationStore`] trait: an append-only table
//! of registration rows that knows nothing about validation or the HTTP
//! surface. The intake service in `brickline-core` only hands it rows that
//! have already been validated and normalized.
//!
//! Two implementations are provided:
//!
//! - [`PostgresStore`] — production backend, backed by `PostgreSQL` (feature `postgres-backend`)
//! - [`MemoryStore`] — in-memory, for development and tests

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres_backend;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres_backend::PostgresStore;

/// Name of the table every backend appends to.
pub const REGISTRATIONS_TABLE: &str = "registrations";

/// A row ready to be appended to the registrations table.
///
/// Enumerated fields are carried as their wire strings. Optional columns are
/// `None` when the submitter left them blank, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRow {
    pub user_type: String,
    pub project_scale: String,
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
}

/// A persisted registration row, including the storage-assigned columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::FromRow))]
pub struct StoredRegistration {
    pub id: i32,
    pub user_type: String,
    pub project_scale: String,
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An append-only registration table.
///
/// Every accepted submission becomes exactly one new row. There is no
/// update, upsert, or deduplication: two identical inserts produce two rows.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait RegistrationStore: Send + Sync + 'static {
    /// Make sure the registrations table exists.
    ///
    /// Must be idempotent and safe when several callers run it at the same
    /// time (create-if-absent, never create-or-fail).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Schema`] if the table cannot be created.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Append one row and return it with its generated id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn insert(&self, row: &RegistrationRow) -> Result<StoredRegistration, StorageError>;
}
