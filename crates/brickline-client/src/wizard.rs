//! Wizard steps and their gating predicates.
//!
//! The wizard is a three-state machine. Leaving a step requires its
//! predicate to hold; every "can I continue" and "is this button enabled"
//! question is answered by [`Step::is_satisfied_by`].

use crate::draft::Draft;

/// One of the three sequential wizard stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Pick a user type.
    Role,
    /// Pick a project scale.
    Scale,
    /// Enter contact details and submit.
    Contact,
}

impl Step {
    /// All steps in order.
    pub const ALL: [Self; 3] = [Self::Role, Self::Scale, Self::Contact];

    /// Number of steps.
    pub const COUNT: usize = Self::ALL.len();

    /// The first step of a fresh session.
    pub const FIRST: Self = Self::Role;

    /// The step on which the form is submitted.
    pub const LAST: Self = Self::Contact;

    /// Zero-based position.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Role => 0,
            Self::Scale => 1,
            Self::Contact => 2,
        }
    }

    /// Step at a zero-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Indicator label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Role => "Your Role",
            Self::Scale => "Project Scale",
            Self::Contact => "Contact Info",
        }
    }

    /// Prompt shown above the step's inputs.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Role => "How would you describe yourself?",
            Self::Scale => "What project scale are you considering?",
            Self::Contact => "Your contact details",
        }
    }

    /// The following step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Role => Some(Self::Scale),
            Self::Scale => Some(Self::Contact),
            Self::Contact => None,
        }
    }

    /// The preceding step, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Role => None,
            Self::Scale => Some(Self::Role),
            Self::Contact => Some(Self::Scale),
        }
    }

    /// Whether the draft holds everything this step requires.
    #[must_use]
    pub fn is_satisfied_by(self, draft: &Draft) -> bool {
        match self {
            Self::Role => draft.user_type.is_some(),
            Self::Scale => draft.project_scale.is_some(),
            Self::Contact => draft.has_contact(),
        }
    }
}

/// How a step indicator is rendered relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Before the current step; may be revisited.
    Completed,
    /// The step being edited.
    Current,
    /// After the current step; not reachable yet.
    Pending,
}

impl StepStatus {
    /// Status of `step` when the wizard is on `current`.
    #[must_use]
    pub fn of(step: Step, current: Step) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use brickline_core::{ProjectScale, UserType};

    use super::*;

    #[test]
    fn indices_and_neighbours_agree() {
        for (i, step) in Step::ALL.into_iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(step));
            assert_eq!(step.next(), Step::from_index(i + 1));
            assert_eq!(step.previous(), i.checked_sub(1).and_then(Step::from_index));
        }
        assert_eq!(Step::from_index(3), None);
        assert_eq!(Step::COUNT, 3);
    }

    #[test]
    fn role_requires_user_type() {
        let mut draft = Draft::default();
        assert!(!Step::Role.is_satisfied_by(&draft));
        draft.user_type = Some(UserType::Partner);
        assert!(Step::Role.is_satisfied_by(&draft));
    }

    #[test]
    fn scale_requires_project_scale() {
        let mut draft = Draft {
            user_type: Some(UserType::Investor),
            ..Draft::default()
        };
        assert!(!Step::Scale.is_satisfied_by(&draft));
        draft.project_scale = Some(ProjectScale::UnderOneMillion);
        assert!(Step::Scale.is_satisfied_by(&draft));
    }

    #[test]
    fn contact_requires_name_and_email() {
        let mut draft = Draft::default();
        draft.full_name = "Jane".to_owned();
        assert!(!Step::Contact.is_satisfied_by(&draft));
        draft.email = "x".to_owned();
        assert!(Step::Contact.is_satisfied_by(&draft));
    }

    #[test]
    fn status_relative_to_current() {
        assert_eq!(StepStatus::of(Step::Role, Step::Scale), StepStatus::Completed);
        assert_eq!(StepStatus::of(Step::Scale, Step::Scale), StepStatus::Current);
        assert_eq!(StepStatus::of(Step::Contact, Step::Scale), StepStatus::Pending);
    }
}
