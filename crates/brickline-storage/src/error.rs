//! Storage error types.
//!
//! Every variant carries enough context to diagnose the problem from the
//! server log alone. None of them is ever shown to an API caller.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to connect to the storage backend.
    #[error("failed to open storage at '{target}': {reason}")]
    Open { target: String, reason: String },

    /// Failed to create or verify the registrations table.
    #[error("failed to ensure table '{table}': {reason}")]
    Schema { table: String, reason: String },

    /// Failed to append a row.
    #[error("failed to insert into '{table}': {reason}")]
    Write { table: String, reason: String },
}
