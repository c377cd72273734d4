//! Brickline intake HTTP server.
//!
//! Wires the intake service and a storage backend into an Axum server that
//! serves the landing page's registration endpoint at `/api/register`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
