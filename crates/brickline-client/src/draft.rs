//! The in-progress registration a form session accumulates.

use brickline_core::{ProjectScale, UserType};
use serde::Serialize;

/// Client-side, unsubmitted form state.
///
/// Serializes to exactly the request body `POST /api/register` expects.
/// Unset enumerations serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub user_type: Option<UserType>,
    pub project_scale: Option<ProjectScale>,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

/// The free-text fields of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Company,
    Message,
}

impl Field {
    /// Every free-text field, in form order.
    pub const ALL: [Self; 4] = [Self::FullName, Self::Email, Self::Company, Self::Message];

    /// Display label, with `*` on required fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name *",
            Self::Email => "Work Email *",
            Self::Company => "Company",
            Self::Message => "Tell us more (optional)",
        }
    }

    /// Example value shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::FullName => "Jane Doe",
            Self::Email => "jane@company.com",
            Self::Company => "Acme Corp",
            Self::Message => "Share your goals, timeline, or anything we should know...",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::FullName | Self::Email)
    }
}

impl Draft {
    /// Current value of a free-text field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Message => &self.message,
        }
    }

    /// Replace a free-text field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Whether both contact fields hold something other than whitespace.
    #[must_use]
    pub fn has_contact(&self) -> bool {
        !self.full_name.trim().is_empty() && !self.email.trim().is_empty()
    }
}
