//! Core library for Brickline registration intake.
//!
//! - [`model`] — the closed `UserType` / `ProjectScale` enumerations and the
//!   persisted [`RegistrationRecord`](model::RegistrationRecord)
//! - [`validation`] — schema check, business rules, and normalization
//! - [`service`] — [`IntakeService`](service::IntakeService), which runs a
//!   raw request body through validation into a storage backend
//! - [`error`] — the `InvalidPayload` / `InvalidFields` / `ServerFault`
//!   taxonomy and the fixed caller-facing messages
//!
//! The crate has no HTTP dependency; the server and the client front-ends
//! both build on it.

pub mod error;
pub mod model;
pub mod service;
pub mod validation;

pub use error::{ErrorKind, IntakeError};
pub use model::{ProjectScale, RegistrationRecord, UserType};
pub use service::{IntakeService, SchemaMode};
pub use validation::{NewRegistration, RegistrationPayload, is_valid_email};
