//! `PostgreSQL` registration store.
//!
//! Appends rows to the `registrations` table. Connecting does not touch the
//! schema; the caller runs [`RegistrationStore::ensure_schema`] once at
//! startup or before each insert.
//!
//! Feature-gated behind `postgres-backend`. Uses `sqlx` with the Tokio
//! runtime for fully async operations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{
    REGISTRATIONS_TABLE, RegistrationRow, RegistrationStore, StorageError, StoredRegistration,
};

/// Advisory lock key serializing concurrent `CREATE TABLE IF NOT EXISTS`.
///
/// Postgres can report a duplicate `pg_type` entry when two sessions create
/// the same table at once, even with `IF NOT EXISTS`.
const SCHEMA_LOCK_KEY: i64 = 0x6272_6963_6b6c_696e;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS registrations (\
        id            SERIAL PRIMARY KEY, \
        user_type     TEXT NOT NULL, \
        project_scale TEXT NOT NULL, \
        full_name     TEXT NOT NULL, \
        email         TEXT NOT NULL, \
        company       TEXT, \
        message       TEXT, \
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()\
    )";

/// A registration store backed by `PostgreSQL`.
///
/// Thread-safe via `PgPool` (connection pool). All operations are fully async.
///
/// # Examples
///
/// ```no_run
/// # use brickline_storage::PostgresStore;
/// # #[tokio::main]
/// # async fn main() {
/// let store = PostgresStore::connect("postgres://localhost/brickline", 10).await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

impl PostgresStore {
    /// Open a connection pool to `PostgreSQL`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the connection fails.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Open {
                // The URL may carry a password.
                target: "postgres".to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn schema_error(e: &sqlx::Error) -> StorageError {
    StorageError::Schema {
        table: REGISTRATIONS_TABLE.to_owned(),
        reason: e.to_string(),
    }
}

#[async_trait::async_trait]
impl RegistrationStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(|e| schema_error(&e))?;

        // Released automatically at commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| schema_error(&e))?;

        sqlx::query(CREATE_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(|e| schema_error(&e))?;

        tx.commit().await.map_err(|e| schema_error(&e))?;

        tracing::debug!(table = REGISTRATIONS_TABLE, "registrations table ensured");
        Ok(())
    }

    async fn insert(&self, row: &RegistrationRow) -> Result<StoredRegistration, StorageError> {
        sqlx::query_as::<_, StoredRegistration>(
            r"INSERT INTO registrations
                (user_type, project_scale, full_name, email, company, message)
              VALUES ($1, $2, $3, $4, $5, $6)
              RETURNING id, user_type, project_scale, full_name, email, company, message, created_at",
        )
        .bind(&row.user_type)
        .bind(&row.project_scale)
        .bind(&row.full_name)
        .bind(&row.email)
        .bind(row.company.as_deref())
        .bind(row.message.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Write {
            table: REGISTRATIONS_TABLE.to_owned(),
            reason: e.to_string(),
        })
    }
}
