use std::collections::BTreeSet;
use std::sync::Arc;

use crate::contract::model::{
    ErrorMap, FieldValues, StatusMessage, SubmittedValues, ValidationBlocked,
};
use crate::domain::error::DomainError;
use crate::domain::schema::FormSchema;

/// Why a submit could not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    Blocked(ValidationBlocked),
    InFlight,
}

/// Values, touched flags, derived errors and submission status of one form.
///
/// Transitions take `self` and return the next state.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Arc<FormSchema>,
    values: FieldValues,
    touched: BTreeSet<String>,
    errors: ErrorMap,
    status: Option<StatusMessage>,
    submitting: bool,
}

impl FormState {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self {
            values: schema.initial_values(),
            schema,
            touched: BTreeSet::new(),
            errors: ErrorMap::new(),
            status: None,
            submitting: false,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Update one field, mark it touched and revalidate it and its dependents.
    pub fn set_field(mut self, name: &str, value: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_field(name)?;
        self.values.insert(name.to_string(), value.into());
        self.touched.insert(name.to_string());

        let affected: Vec<String> = std::iter::once(name)
            .chain(self.schema.dependents_of(name))
            .map(str::to_string)
            .collect();
        for field in affected {
            self.refresh_error(&field);
        }
        Ok(self)
    }

    /// Mark a field touched and validate it without changing its value.
    pub fn blur(mut self, name: &str) -> Result<Self, DomainError> {
        self.ensure_field(name)?;
        self.touched.insert(name.to_string());
        self.refresh_error(name);
        Ok(self)
    }

    /// Touch every field and validate them all, as a submit attempt does.
    pub fn touch_all(mut self) -> Self {
        self.touched = self.schema.fields().iter().map(|f| f.name.clone()).collect();
        self.errors = self.validate_all();
        self
    }

    /// Errors of every field, touched or not.
    pub fn validate_all(&self) -> ErrorMap {
        self.schema.validate_all(&self.values)
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.schema.initial_values()
    }

    /// No field errors, changed when the form requires it, and not in flight.
    pub fn is_submittable(&self) -> bool {
        !self.submitting
            && (!self.schema.requires_dirty() || self.is_dirty())
            && self.validate_all().is_empty()
    }

    /// Validated values, or the full error map when something fails.
    pub fn submit(&self) -> Result<SubmittedValues, ValidationBlocked> {
        let errors = self.validate_all();
        let pristine = self.schema.requires_dirty() && !self.is_dirty();
        if !errors.is_empty() || pristine {
            return Err(ValidationBlocked { errors, pristine });
        }
        Ok(SubmittedValues {
            kind: self.schema.kind(),
            values: self.values.clone(),
        })
    }

    /// Touch all fields, validate and flip into the in-flight state.
    pub fn begin_submit(self) -> (Self, Result<SubmittedValues, SubmitRejection>) {
        if self.submitting {
            return (self, Err(SubmitRejection::InFlight));
        }
        let mut state = self.touch_all();
        match state.submit() {
            Ok(values) => {
                state.submitting = true;
                state.status = None;
                (state, Ok(values))
            }
            Err(blocked) => (state, Err(SubmitRejection::Blocked(blocked))),
        }
    }

    /// Leave the in-flight state with a status line. Values are kept.
    pub fn finish_submit(mut self, status: StatusMessage) -> Self {
        self.submitting = false;
        self.status = Some(status);
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Errors computed so far, touched or not.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Errors of touched fields only.
    pub fn visible_errors(&self) -> ErrorMap {
        self.errors
            .iter()
            .filter(|(name, _)| self.touched.contains(*name))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn ensure_field(&self, name: &str) -> Result<(), DomainError> {
        if self.schema.field(name).is_none() {
            return Err(DomainError::unknown_field(self.schema.kind(), name));
        }
        Ok(())
    }

    fn refresh_error(&mut self, name: &str) {
        match self.schema.validate_field(name, &self.values) {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }
}
