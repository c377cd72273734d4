//! Registration intake service.
//!
//! [`IntakeService`] is the whole server-side pipeline minus HTTP: raw body
//! in, persisted record or classified error out. Each call is independent;
//! the service holds no per-request state.

use std::sync::Arc;

use brickline_storage::RegistrationStore;
use tracing::{info, warn};

use crate::error::IntakeError;
use crate::model::RegistrationRecord;
use crate::validation::{NewRegistration, RegistrationPayload};

/// When the registrations table is ensured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    /// Once, when the store is opened. Requests only insert.
    #[default]
    Startup,
    /// Before every insert. Idempotent, but costs one extra round trip.
    PerRequest,
}

impl std::fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Startup => write!(f, "startup"),
            Self::PerRequest => write!(f, "per-request"),
        }
    }
}

impl std::str::FromStr for SchemaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "startup" => Ok(Self::Startup),
            "per-request" | "per_request" | "request" => Ok(Self::PerRequest),
            other => Err(format!("unknown schema mode: {other}")),
        }
    }
}

/// Validates submissions and appends them to a [`RegistrationStore`].
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn RegistrationStore>,
    schema_mode: SchemaMode,
}

impl std::fmt::Debug for IntakeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeService")
            .field("schema_mode", &self.schema_mode)
            .finish_non_exhaustive()
    }
}

impl IntakeService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RegistrationStore>, schema_mode: SchemaMode) -> Self {
        Self { store, schema_mode }
    }

    /// The configured schema mode.
    #[must_use]
    pub const fn schema_mode(&self) -> SchemaMode {
        self.schema_mode
    }

    /// Run the full pipeline on a raw JSON request body.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::InvalidPayload`] if the body fails the schema check
    /// - [`IntakeError::InvalidFields`] if the name or email is unusable
    /// - [`IntakeError::Storage`] if the table cannot be ensured or written
    ///
    /// Nothing is written unless the call returns `Ok`.
    pub async fn register(&self, body: &[u8]) -> Result<RegistrationRecord, IntakeError> {
        let payload = RegistrationPayload::from_json(body).inspect_err(log_rejection)?;
        self.register_payload(payload).await
    }

    /// Run business validation and persistence on an already parsed payload.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register), minus the schema case.
    pub async fn register_payload(
        &self,
        payload: RegistrationPayload,
    ) -> Result<RegistrationRecord, IntakeError> {
        let registration = payload.validate().inspect_err(log_rejection)?;
        self.persist(registration).await
    }

    /// Append a validated registration.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Storage`] on any storage failure.
    pub async fn persist(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, IntakeError> {
        if self.schema_mode == SchemaMode::PerRequest {
            self.store.ensure_schema().await?;
        }

        let stored = self.store.insert(&registration.to_row()).await?;

        info!(
            id = stored.id,
            user_type = %registration.user_type(),
            project_scale = %registration.project_scale(),
            "registration persisted"
        );

        Ok(RegistrationRecord {
            id: stored.id,
            user_type: registration.user_type(),
            project_scale: registration.project_scale(),
            full_name: stored.full_name,
            email: stored.email,
            company: stored.company,
            message: stored.message,
            created_at: stored.created_at,
        })
    }
}

fn log_rejection(err: &IntakeError) {
    // The reason never contains the submitted email.
    warn!(kind = ?err.kind(), reason = %err, "registration rejected");
}
