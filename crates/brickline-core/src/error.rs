//! Error types for `brickline-core`.
//!
//! Each variant carries the precise reason for server-side logs. The
//! messages a caller is allowed to see are fixed per [`ErrorKind`] and never
//! include the reason.

use brickline_storage::StorageError;

/// Message returned when the body is not a well-formed registration object.
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request body.";

/// Message returned when the name or email fails business validation.
pub const INVALID_FIELDS_MESSAGE: &str = "Please provide a valid name and email address.";

/// Message returned for any storage or unexpected failure.
pub const SERVER_FAULT_MESSAGE: &str = "Server error while saving registration.";

/// Terminal rejection category of an intake request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed JSON, missing structural fields, or out-of-enumeration values.
    InvalidPayload,
    /// Empty name, empty or malformed email.
    InvalidFields,
    /// Storage unreachable or another unexpected failure.
    ServerFault,
}

impl ErrorKind {
    /// The caller-facing message for this kind.
    #[must_use]
    pub const fn client_message(self) -> &'static str {
        match self {
            Self::InvalidPayload => INVALID_PAYLOAD_MESSAGE,
            Self::InvalidFields => INVALID_FIELDS_MESSAGE,
            Self::ServerFault => SERVER_FAULT_MESSAGE,
        }
    }

    /// Whether the caller can fix the request and try again.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::InvalidPayload | Self::InvalidFields)
    }
}

/// Errors from the registration intake pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The body failed the structural schema check.
    #[error("invalid payload: {reason}")]
    InvalidPayload { reason: String },

    /// The body was structurally valid but a field failed business rules.
    #[error("invalid fields: {reason}")]
    InvalidFields { reason: String },

    /// The storage layer failed while ensuring the table or inserting.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntakeError {
    /// Classify this error into its terminal rejection kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPayload { .. } => ErrorKind::InvalidPayload,
            Self::InvalidFields { .. } => ErrorKind::InvalidFields,
            Self::Storage(_) => ErrorKind::ServerFault,
        }
    }

    /// The caller-facing message. Never contains the internal reason.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        self.kind().client_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_distinct_messages() {
        let payload = IntakeError::InvalidPayload {
            reason: "missing field `email`".to_owned(),
        };
        let fields = IntakeError::InvalidFields {
            reason: "email is empty".to_owned(),
        };
        assert_eq!(payload.client_message(), INVALID_PAYLOAD_MESSAGE);
        assert_eq!(fields.client_message(), INVALID_FIELDS_MESSAGE);
        assert_ne!(payload.client_message(), fields.client_message());
    }

    #[test]
    fn storage_error_is_server_fault_and_hides_reason() {
        let err = IntakeError::from(StorageError::Write {
            table: "registrations".to_owned(),
            reason: "connection refused to 10.0.0.5".to_owned(),
        });
        assert_eq!(err.kind(), ErrorKind::ServerFault);
        assert!(!err.kind().is_client_error());
        assert!(!err.client_message().contains("10.0.0.5"));
        assert!(err.to_string().contains("connection refused"));
    }
}
