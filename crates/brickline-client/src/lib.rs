//! Brickline intake form controller.
//!
//! Drives the three-step registration wizard (role, project scale, contact
//! details) and submits the result to `POST /api/register`.
//!
//! # Example
//!
//! ```rust,no_run
//! use brickline_client::{ClientConfig, Field, FormController, HttpTransport, SubmitOutcome};
//! use brickline_core::{ProjectScale, UserType};
//!
//! # async fn example() -> Result<(), brickline_client::ClientError> {
//! let transport = HttpTransport::new(ClientConfig::default())?;
//! let mut form = FormController::new();
//!
//! form.select_user_type(UserType::Investor);
//! form.advance();
//! form.select_project_scale(ProjectScale::OneToTenMillion);
//! form.advance();
//! form.update_field(Field::FullName, "Jane Doe");
//! form.update_field(Field::Email, "jane@co.com");
//!
//! if form.submit(&transport).await == SubmitOutcome::Submitted {
//!     let _confirmation = form.success_message();
//! }
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod draft;
pub mod error;
pub mod transport;
pub mod wizard;

pub use controller::{
    FormController, INVALID_EMAIL_MESSAGE, REGISTER_PATH, SUBMIT_FALLBACK_MESSAGE, SubmitOutcome,
};
pub use draft::{Draft, Field};
pub use error::ClientError;
pub use transport::{
    ApiRequest, ClientConfig, DEFAULT_BASE_URL, HttpTransport, Transport, TransportResponse,
};
pub use wizard::{Step, StepStatus};
