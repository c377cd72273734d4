//! Registration domain types.
//!
//! The two closed enumerations a registrant picks from, with the wire
//! strings used in JSON and in the `registrations` table, plus the display
//! metadata every front-end shows next to each option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── User type ────────────────────────────────────────────────────────

/// What kind of party is registering interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Investor,
    Developer,
    Partner,
}

impl UserType {
    /// Every variant, in the order the wizard presents them.
    pub const ALL: [Self; 3] = [Self::Investor, Self::Developer, Self::Partner];

    /// Wire string (`investor`, `developer`, `partner`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::Developer => "developer",
            Self::Partner => "partner",
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Investor => "Investor",
            Self::Developer => "Developer",
            Self::Partner => "Partner",
        }
    }

    /// One-line description shown under the label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Investor => "Looking to invest in tokenized real estate assets",
            Self::Developer => "Want to tokenize and list your real estate projects",
            Self::Partner => "Interested in strategic or technology partnerships",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown user type: {s}"))
    }
}

// ── Project scale ────────────────────────────────────────────────────

/// Budget bracket of the project the registrant has in mind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectScale {
    #[serde(rename = "under_1m")]
    UnderOneMillion,
    #[serde(rename = "1m_10m")]
    OneToTenMillion,
    #[serde(rename = "10m_50m")]
    TenToFiftyMillion,
    #[serde(rename = "50m_plus")]
    FiftyMillionPlus,
}

impl ProjectScale {
    /// Every variant, smallest bracket first.
    pub const ALL: [Self; 4] = [
        Self::UnderOneMillion,
        Self::OneToTenMillion,
        Self::TenToFiftyMillion,
        Self::FiftyMillionPlus,
    ];

    /// Wire string (`under_1m`, `1m_10m`, `10m_50m`, `50m_plus`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderOneMillion => "under_1m",
            Self::OneToTenMillion => "1m_10m",
            Self::TenToFiftyMillion => "10m_50m",
            Self::FiftyMillionPlus => "50m_plus",
        }
    }

    /// Display label with the dollar range.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderOneMillion => "Under $1 M",
            Self::OneToTenMillion => "$1 M – $10 M",
            Self::TenToFiftyMillion => "$10 M – $50 M",
            Self::FiftyMillionPlus => "$50 M +",
        }
    }

    /// Tier tag shown above the label.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::UnderOneMillion => "Starter",
            Self::OneToTenMillion => "Growth",
            Self::TenToFiftyMillion => "Enterprise",
            Self::FiftyMillionPlus => "Institutional",
        }
    }
}

impl std::fmt::Display for ProjectScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown project scale: {s}"))
    }
}

// ── Records ──────────────────────────────────────────────────────────

/// A persisted registration. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: i32,
    pub user_type: UserType,
    pub project_scale: ProjectScale,
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
