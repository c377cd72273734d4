//! Intake form controller.
//!
//! [`FormController`] owns one form session: the current [`Step`], the
//! [`Draft`], and the submission flags. Navigation is gated by
//! [`Step::is_satisfied_by`]; submission goes through an injected
//! [`Transport`].
//!
//! `submit` borrows the controller mutably for the whole exchange, so a
//! second submission cannot start while one is in flight.

use brickline_core::{ProjectScale, UserType, is_valid_email};
use tracing::warn;

use crate::draft::{Draft, Field};
use crate::transport::{ApiRequest, Transport};
use crate::wizard::{Step, StepStatus};

/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "/api/register";

/// Field error shown when the email fails the syntactic check.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Submission error shown when the server gives no usable message.
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit. Please try again.";

/// Result of a [`FormController::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not allowed right now: not on the last step, the contact step is
    /// incomplete, or the session is already submitting or submitted.
    Blocked,
    /// The email failed the local check. No request was sent.
    InvalidEmail,
    /// The request failed; the message is also in `submit_error`.
    Failed(String),
    /// The server accepted the registration.
    Submitted,
}

/// State machine behind the three-step registration form.
#[derive(Debug, Clone)]
pub struct FormController {
    step: Step,
    draft: Draft,
    submitting: bool,
    submitted: bool,
    email_error: Option<String>,
    submit_error: Option<String>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    /// A fresh session on the first step with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::FIRST,
            draft: Draft::default(),
            submitting: false,
            submitted: false,
            email_error: None,
            submit_error: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    // ── Editing ──────────────────────────────────────────────────────
    //
    // Edits are ignored once the session is submitted; the draft is then
    // what the success view shows.

    /// Choose a user type. Does not advance.
    pub fn select_user_type(&mut self, value: UserType) {
        if !self.submitted {
            self.draft.user_type = Some(value);
        }
    }

    /// Choose a project scale. Does not advance.
    pub fn select_project_scale(&mut self, value: ProjectScale) {
        if !self.submitted {
            self.draft.project_scale = Some(value);
        }
    }

    /// Replace a free-text field. Editing the email clears its error.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        if self.submitted {
            return;
        }
        self.draft.set(field, value);
        if field == Field::Email {
            self.email_error = None;
        }
    }

    /// Clear the submission error, e.g. when the user dismisses it.
    pub fn dismiss_error(&mut self) {
        self.submit_error = None;
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Whether the current step's requirements are met.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.step.is_satisfied_by(&self.draft)
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == Step::LAST && self.can_advance() && !self.submitting && !self.submitted
    }

    /// Move to the next step if the current one is satisfied.
    ///
    /// Returns whether the step changed. On the last step this is always a
    /// no-op; use [`submit`](Self::submit) instead.
    pub fn advance(&mut self) -> bool {
        if self.submitted || !self.can_advance() {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Move to the previous step. Returns whether the step changed.
    pub fn retreat(&mut self) -> bool {
        if self.submitted {
            return false;
        }
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Jump back to an already completed step.
    ///
    /// Only indices before the current step are accepted; anything else is
    /// ignored. Returns whether the step changed.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.submitted || index >= self.step.index() {
            return false;
        }
        match Step::from_index(index) {
            Some(target) => {
                self.step = target;
                true
            }
            None => false,
        }
    }

    /// Indicator state of the step at `index`, or `None` past the end.
    #[must_use]
    pub fn step_status(&self, index: usize) -> Option<StepStatus> {
        Step::from_index(index).map(|step| StepStatus::of(step, self.step))
    }

    /// Fraction of the wizard reached, counting the current step.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        (self.step.index() + 1) as f64 / Step::COUNT as f64
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Send the draft to the registration endpoint.
    ///
    /// Checks the email locally first; a malformed email sets
    /// `email_error` and sends nothing. Otherwise prior errors are cleared,
    /// the request is sent, and the outcome recorded. The draft is never
    /// modified, so a failed attempt can be corrected and retried.
    pub async fn submit<T: Transport + ?Sized>(&mut self, transport: &T) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Blocked;
        }

        if !is_valid_email(&self.draft.email) {
            self.email_error = Some(INVALID_EMAIL_MESSAGE.to_owned());
            return SubmitOutcome::InvalidEmail;
        }

        self.email_error = None;
        self.submit_error = None;
        self.submitting = true;

        let outcome = match self.send(transport).await {
            Ok(()) => {
                self.submitted = true;
                SubmitOutcome::Submitted
            }
            Err(message) => {
                self.submit_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        };

        self.submitting = false;
        outcome
    }

    async fn send<T: Transport + ?Sized>(&self, transport: &T) -> Result<(), String> {
        let body = serde_json::to_vec(&self.draft).map_err(|e| {
            warn!(error = %e, "failed to encode registration draft");
            SUBMIT_FALLBACK_MESSAGE.to_owned()
        })?;

        let request = ApiRequest {
            path: REGISTER_PATH.to_owned(),
            body,
        };

        let response = transport.post_json(request).await.map_err(|e| {
            warn!(error = %e, "registration request failed");
            SUBMIT_FALLBACK_MESSAGE.to_owned()
        })?;

        if response.is_success() {
            Ok(())
        } else {
            warn!(status = response.status, "registration rejected by server");
            Err(response
                .error_message()
                .unwrap_or_else(|| SUBMIT_FALLBACK_MESSAGE.to_owned()))
        }
    }

    /// Confirmation text for the success view. `None` until submitted.
    ///
    /// Shows the name and email as the server stored them: trimmed, with
    /// the email lower-cased.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        self.submitted.then(|| {
            format!(
                "Thank you, {}. We'll reach out to you at {} with next steps.",
                self.draft.full_name.trim(),
                self.draft.email.trim().to_lowercase()
            )
        })
    }

    /// Start a new, unrelated session: empty draft, first step, no errors.
    pub fn reset_after_success(&mut self) {
        self.draft = Draft::default();
        self.step = Step::FIRST;
        self.submitted = false;
        self.email_error = None;
        self.submit_error = None;
    }
}
