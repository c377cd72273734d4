//! Payload schema and business validation.
//!
//! Validation happens in two independent passes:
//!
//! 1. **Schema** — [`RegistrationPayload::from_json`] accepts only a JSON
//!    object whose `fullName`/`email` are strings and whose
//!    `userType`/`projectScale` are members of their enumerations.
//! 2. **Business** — [`RegistrationPayload::validate`] trims and
//!    lower-cases, then requires a non-empty name and a syntactically valid
//!    email. Blank optional fields become `None`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::model::{ProjectScale, UserType};

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid literal")
});

/// Basic syntactic email check: `local@domain.tld` with no whitespace and
/// exactly one `@`.
///
/// The input is tested as given; callers decide whether to trim first.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A registration request body that passed the schema check.
///
/// Unknown keys are ignored. `company` and `message` may be absent or
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub user_type: UserType,
    pub project_scale: ProjectScale,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A registration that passed both validation passes and is ready to store.
///
/// Only obtainable through [`RegistrationPayload::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    user_type: UserType,
    project_scale: ProjectScale,
    full_name: String,
    email: String,
    company: Option<String>,
    message: Option<String>,
}

impl RegistrationPayload {
    /// Parse a raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidPayload`] if the body is not JSON, is
    /// not an object, lacks a required field, has a field of the wrong type,
    /// or names a value outside an enumeration.
    pub fn from_json(body: &[u8]) -> Result<Self, IntakeError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| IntakeError::InvalidPayload {
                reason: format!("malformed json: {e}"),
            })?;

        Self::from_value(value)
    }

    /// Schema-check an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json), minus the syntax case.
    pub fn from_value(value: serde_json::Value) -> Result<Self, IntakeError> {
        // serde would also accept a positional array for a struct.
        if !value.is_object() {
            return Err(IntakeError::InvalidPayload {
                reason: "body is not a json object".to_owned(),
            });
        }

        serde_json::from_value(value).map_err(|e| IntakeError::InvalidPayload {
            reason: e.to_string(),
        })
    }

    /// Apply business rules and normalization.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidFields`] if the trimmed name is empty,
    /// or the trimmed, lower-cased email is empty or malformed.
    pub fn validate(self) -> Result<NewRegistration, IntakeError> {
        let full_name = self.full_name.trim().to_owned();
        let email = self.email.trim().to_lowercase();

        if full_name.is_empty() {
            return Err(IntakeError::InvalidFields {
                reason: "full name is empty".to_owned(),
            });
        }
        if email.is_empty() {
            return Err(IntakeError::InvalidFields {
                reason: "email is empty".to_owned(),
            });
        }
        if !is_valid_email(&email) {
            return Err(IntakeError::InvalidFields {
                reason: "email does not match local@domain.tld".to_owned(),
            });
        }

        Ok(NewRegistration {
            user_type: self.user_type,
            project_scale: self.project_scale,
            full_name,
            email,
            company: non_blank(self.company),
            message: non_blank(self.message),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl NewRegistration {
    #[must_use]
    pub const fn user_type(&self) -> UserType {
        self.user_type
    }

    #[must_use]
    pub const fn project_scale(&self) -> ProjectScale {
        self.project_scale
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Storage row for this registration.
    #[must_use]
    pub fn to_row(&self) -> brickline_storage::RegistrationRow {
        brickline_storage::RegistrationRow {
            user_type: self.user_type.as_str().to_owned(),
            project_scale: self.project_scale.as_str().to_owned(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            message: self.message.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(json: &str) -> Result<RegistrationPayload, IntakeError> {
        RegistrationPayload::from_json(json.as_bytes())
    }

    fn valid_json(email: &str) -> String {
        format!(
            r#"{{"userType":"investor","projectScale":"1m_10m","fullName":"Jane","email":"{email}"}}"#
        )
    }

    // ── Email pattern ────────────────────────────────────────────────

    #[test]
    fn email_pattern_accepts_basic_addresses() {
        for ok in ["jane@co.com", "a.b+tag@sub.example.org", "x@y.z"] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for bad in [
            "not-an-email",
            "",
            "@co.com",
            "jane@",
            "jane@co",
            "jane@co.",
            "jane@@co.com",
            "ja ne@co.com",
            "jane@co.com ",
            "jane@co.com\n",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be invalid");
        }
    }

    // ── Schema pass ──────────────────────────────────────────────────

    #[test]
    fn schema_accepts_minimal_object() {
        let payload = parse(&valid_json("jane@co.com")).unwrap();
        assert_eq!(payload.user_type, UserType::Investor);
        assert_eq!(payload.project_scale, ProjectScale::OneToTenMillion);
        assert_eq!(payload.company, None);
    }

    #[test]
    fn schema_ignores_unknown_keys_and_null_optionals() {
        let payload = parse(
            r#"{"userType":"partner","projectScale":"50m_plus","fullName":"A","email":"a@b.co",
                "company":null,"message":null,"referrer":"ad"}"#,
        )
        .unwrap();
        assert_eq!(payload.user_type, UserType::Partner);
        assert_eq!(payload.message, None);
    }

    #[test]
    fn schema_rejects_out_of_enumeration_values() {
        let bad_user = parse(
            r#"{"userType":"admin","projectScale":"1m_10m","fullName":"A","email":"a@b.co"}"#,
        );
        let bad_scale = parse(
            r#"{"userType":"investor","projectScale":"huge","fullName":"A","email":"a@b.co"}"#,
        );
        assert_eq!(bad_user.unwrap_err().kind(), ErrorKind::InvalidPayload);
        assert_eq!(bad_scale.unwrap_err().kind(), ErrorKind::InvalidPayload);
    }

    #[test]
    fn schema_rejects_missing_or_mistyped_fields() {
        let cases = [
            r#"{"userType":"investor","projectScale":"1m_10m","fullName":"A"}"#,
            r#"{"userType":"investor","projectScale":"1m_10m","email":"a@b.co"}"#,
            r#"{"userType":"investor","projectScale":"1m_10m","fullName":42,"email":"a@b.co"}"#,
            r#"{"userType":null,"projectScale":"1m_10m","fullName":"A","email":"a@b.co"}"#,
            r#"{"userType":"investor","projectScale":"1m_10m","fullName":"A","email":"a@b.co","company":7}"#,
        ];
        for json in cases {
            let err = parse(json).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPayload, "{json}");
        }
    }

    #[test]
    fn schema_rejects_non_objects() {
        for json in [
            "not json",
            "null",
            "\"text\"",
            r#"["investor","1m_10m","A","a@b.co"]"#,
        ] {
            assert_eq!(parse(json).unwrap_err().kind(), ErrorKind::InvalidPayload);
        }
    }

    // ── Business pass ────────────────────────────────────────────────

    #[test]
    fn validate_normalizes_fields() {
        let reg = parse(
            r#"{"userType":"investor","projectScale":"1m_10m","fullName":" Jane Doe ",
                "email":"JANE@Co.com","company":"","message":""}"#,
        )
        .unwrap()
        .validate()
        .unwrap();

        assert_eq!(reg.full_name(), "Jane Doe");
        assert_eq!(reg.email(), "jane@co.com");
        assert_eq!(reg.company(), None);
        assert_eq!(reg.message(), None);
    }

    #[test]
    fn validate_trims_optional_fields() {
        let reg = parse(
            r#"{"userType":"developer","projectScale":"under_1m","fullName":"A","email":"a@b.co",
                "company":"  Acme Corp ","message":"   "}"#,
        )
        .unwrap()
        .validate()
        .unwrap();

        assert_eq!(reg.company(), Some("Acme Corp"));
        assert_eq!(reg.message(), None);
    }

    #[test]
    fn validate_accepts_email_with_surrounding_whitespace() {
        let reg = parse(&valid_json("  Jane@Co.com\\t")).unwrap().validate().unwrap();
        assert_eq!(reg.email(), "jane@co.com");
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = parse(
            r#"{"userType":"investor","projectScale":"1m_10m","fullName":"   ","email":"a@b.co"}"#,
        )
        .unwrap()
        .validate()
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFields);
    }

    #[test]
    fn validate_rejects_bad_or_empty_email() {
        for email in ["not-an-email", "   ", "jane@co"] {
            let err = parse(&valid_json(email)).unwrap().validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFields, "{email:?}");
        }
    }

    #[test]
    fn to_row_uses_wire_strings() {
        let row = parse(&valid_json("a@b.co")).unwrap().validate().unwrap().to_row();
        assert_eq!(row.user_type, "investor");
        assert_eq!(row.project_scale, "1m_10m");
    }
}
