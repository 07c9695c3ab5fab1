use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Field name → message of the first failing rule. Valid fields are absent.
pub type ErrorMap = BTreeMap<String, String>;

/// Field name → current value.
pub type FieldValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Login,
    Register,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Login => "login",
            FormKind::Register => "register",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values that passed validation, handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedValues {
    pub kind: FormKind,
    pub values: FieldValues,
}

/// Submit attempt stopped before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationBlocked {
    pub errors: ErrorMap,
    /// The form requires a change from its initial values and has none.
    pub pristine: bool,
}

impl fmt::Display for ValidationBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() && self.pristine {
            return f.write_str("form has not been changed");
        }
        write!(f, "{} field(s) invalid", self.errors.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// Single top-level status line of a form, separate from field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Route change requested after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    pub route: String,
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked(ValidationBlocked),
    /// A submission of this form is already in flight.
    InFlight,
    /// The collaborator refused or failed; values are kept.
    Rejected { message: String },
    Accepted {
        message: String,
        navigation: NavigationRequest,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}
