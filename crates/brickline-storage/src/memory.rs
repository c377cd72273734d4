//! In-memory registration store.
//!
//! Rows live in a `Vec` behind a `RwLock` and are lost when the process
//! exits. Use this for local development and for tests that need a real
//! store without a database.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{RegistrationRow, RegistrationStore, StorageError, StoredRegistration};

/// An in-memory registration table.
///
/// Cloning shares the same underlying rows, so a test can keep a handle
/// while the service owns another.
///
/// # Examples
///
/// ```
/// # use brickline_storage::{MemoryStore, RegistrationRow, RegistrationStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let row = RegistrationRow {
///     user_type: "investor".to_owned(),
///     project_scale: "1m_10m".to_owned(),
///     full_name: "Jane Doe".to_owned(),
///     email: "jane@co.com".to_owned(),
///     company: None,
///     message: None,
/// };
/// let stored = store.insert(&row).await.unwrap();
/// assert_eq!(stored.id, 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<Vec<StoredRegistration>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every row, in insertion order.
    pub async fn snapshot(&self) -> Vec<StoredRegistration> {
        self.rows.read().await.clone()
    }

    /// Number of rows written so far.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no row has been written yet.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl RegistrationStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn insert(&self, row: &RegistrationRow) -> Result<StoredRegistration, StorageError> {
        let mut rows = self.rows.write().await;

        // Ids start at 1 like a SERIAL column.
        let id = i32::try_from(rows.len())
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| StorageError::Write {
                table: crate::REGISTRATIONS_TABLE.to_owned(),
                reason: "id sequence exhausted".to_owned(),
            })?;

        let stored = StoredRegistration {
            id,
            user_type: row.user_type.clone(),
            project_scale: row.project_scale.clone(),
            full_name: row.full_name.clone(),
            email: row.email.clone(),
            company: row.company.clone(),
            message: row.message.clone(),
            created_at: Utc::now(),
        };
        rows.push(stored.clone());

        Ok(stored)
    }
}
