//! Shared application state for the Brickline intake server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. Requests share nothing else: the intake service
//! keeps no per-request memory.

use brickline_core::IntakeService;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validation and persistence pipeline for registrations.
    pub intake: IntakeService,
}
