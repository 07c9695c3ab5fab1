//! Field rule variants.
//!
//! A field carries an ordered list of rules and reports only the first one
//! that fails. Every rule except `Required` accepts an empty value, so an
//! empty optional field is valid and an empty required field reports the
//! required message.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contract::model::FieldValues;

/// `something@something.something` without whitespace.
pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Valid regex pattern"));

/// Ten digits starting with 6-9.
pub static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Valid regex pattern"));

#[derive(Debug, Clone)]
pub enum Rule {
    /// Non-empty after trimming.
    Required { message: String },
    /// At least `min` characters.
    MinLength { min: usize, message: String },
    Pattern { regex: Regex, message: String },
    Email { message: String },
    /// Must equal the value of field `other`.
    EqualsField { other: String, message: String },
    OneOf { choices: Vec<String>, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Rule::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Rule::Pattern {
            regex,
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Rule::Email {
            message: message.into(),
        }
    }

    pub fn equals_field(other: impl Into<String>, message: impl Into<String>) -> Self {
        Rule::EqualsField {
            other: other.into(),
            message: message.into(),
        }
    }

    pub fn one_of<I, S>(choices: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::OneOf {
            choices: choices.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::Email { message }
            | Rule::EqualsField { message, .. }
            | Rule::OneOf { message, .. } => message,
        }
    }

    /// Field this rule reads besides its own.
    pub fn depends_on(&self) -> Option<&str> {
        match self {
            Rule::EqualsField { other, .. } => Some(other),
            _ => None,
        }
    }

    pub fn is_satisfied(&self, value: &str, values: &FieldValues) -> bool {
        if let Rule::Required { .. } = self {
            return !value.trim().is_empty();
        }
        if value.is_empty() {
            return true;
        }
        match self {
            Rule::Required { .. } => true,
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::Pattern { regex, .. } => regex.is_match(value),
            Rule::Email { .. } => EMAIL_RE.is_match(value),
            Rule::EqualsField { other, .. } => {
                values.get(other).map(String::as_str).unwrap_or_default() == value
            }
            Rule::OneOf { choices, .. } => choices.iter().any(|c| c == value),
        }
    }

    /// `Err(message)` when the rule fails.
    pub fn check(&self, value: &str, values: &FieldValues) -> Result<(), &str> {
        if self.is_satisfied(value, values) {
            Ok(())
        } else {
            Err(self.message())
        }
    }
}
