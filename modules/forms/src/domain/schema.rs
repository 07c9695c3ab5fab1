use std::collections::BTreeSet;

use crate::contract::model::{ErrorMap, FieldValues, FormKind};
use crate::domain::error::DomainError;
use crate::domain::rules::Rule;

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub initial: String,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            initial: String::new(),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Message of the first failing rule.
    pub fn first_error(&self, values: &FieldValues) -> Option<&str> {
        let value = values.get(&self.name).map(String::as_str).unwrap_or_default();
        self.rules.iter().find_map(|r| r.check(value, values).err())
    }
}

/// Ordered set of fields with their rules.
#[derive(Debug, Clone)]
pub struct FormSchema {
    kind: FormKind,
    fields: Vec<FieldSpec>,
    requires_dirty: bool,
}

impl FormSchema {
    pub fn builder(kind: FormKind) -> FormSchemaBuilder {
        FormSchemaBuilder {
            kind,
            fields: Vec::new(),
            requires_dirty: false,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Submit additionally requires a change from the initial values.
    pub fn requires_dirty(&self) -> bool {
        self.requires_dirty
    }

    pub fn initial_values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial.clone()))
            .collect()
    }

    /// Fields whose rules read `name`.
    pub fn dependents_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.rules.iter().any(|r| r.depends_on() == Some(name)))
            .map(|f| f.name.as_str())
    }

    pub fn validate_field(&self, name: &str, values: &FieldValues) -> Option<String> {
        self.field(name)
            .and_then(|f| f.first_error(values))
            .map(str::to_string)
    }

    pub fn validate_all(&self, values: &FieldValues) -> ErrorMap {
        self.fields
            .iter()
            .filter_map(|f| {
                f.first_error(values)
                    .map(|message| (f.name.clone(), message.to_string()))
            })
            .collect()
    }
}

pub struct FormSchemaBuilder {
    kind: FormKind,
    fields: Vec<FieldSpec>,
    requires_dirty: bool,
}

impl FormSchemaBuilder {
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn requires_dirty(mut self, yes: bool) -> Self {
        self.requires_dirty = yes;
        self
    }

    /// Rejects duplicate names and cross-field rules pointing at unknown fields.
    pub fn build(self) -> Result<FormSchema, DomainError> {
        let mut names = BTreeSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }
        for field in &self.fields {
            for target in field.rules.iter().filter_map(Rule::depends_on) {
                if !names.contains(target) {
                    return Err(DomainError::UnknownFieldReference {
                        field: field.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(FormSchema {
            kind: self.kind,
            fields: self.fields,
            requires_dirty: self.requires_dirty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn password_schema() -> FormSchema {
        FormSchema::builder(FormKind::Register)
            .field(
                FieldSpec::new("password", "Password")
                    .rule(Rule::required("Password is required"))
                    .rule(Rule::min_length(6, "Password must be at least 6 characters")),
            )
            .field(
                FieldSpec::new("confirmPassword", "Confirm Password")
                    .rule(Rule::required("Confirm Password is required"))
                    .rule(Rule::equals_field("password", "Passwords must match")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn only_first_failing_rule_is_reported() {
        let schema = password_schema();
        let errors = schema.validate_all(&values(&[("password", ""), ("confirmPassword", "")]));
        assert_eq!(errors["password"], "Password is required");
        assert_eq!(errors["confirmPassword"], "Confirm Password is required");

        let errors =
            schema.validate_all(&values(&[("password", "abc"), ("confirmPassword", "abd")]));
        assert_eq!(errors["password"], "Password must be at least 6 characters");
        assert_eq!(errors["confirmPassword"], "Passwords must match");
    }

    #[test]
    fn valid_form_has_empty_error_map() {
        let schema = password_schema();
        let errors =
            schema.validate_all(&values(&[("password", "abcdef"), ("confirmPassword", "abcdef")]));
        assert!(errors.is_empty());
    }

    #[test]
    fn dependents_are_found() {
        let schema = password_schema();
        assert_eq!(schema.dependents_of("password").collect::<Vec<_>>(), vec!["confirmPassword"]);
        assert_eq!(schema.dependents_of("confirmPassword").count(), 0);
    }

    #[test]
    fn build_rejects_dangling_reference() {
        let res = FormSchema::builder(FormKind::Register)
            .field(FieldSpec::new("confirm", "Confirm").rule(Rule::equals_field("secret", "x")))
            .build();
        assert!(matches!(res, Err(DomainError::UnknownFieldReference { .. })));
    }

    #[test]
    fn build_rejects_duplicates() {
        let res = FormSchema::builder(FormKind::Login)
            .field(FieldSpec::new("email", "Email"))
            .field(FieldSpec::new("email", "Email again"))
            .build();
        assert_eq!(
            res.err(),
            Some(DomainError::DuplicateField {
                field: "email".into()
            })
        );
    }
}
