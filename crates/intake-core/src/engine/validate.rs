//! Client-side validation of the currently visible fields.
//!
//! Only visible, required fields are checked. A field produces at most one
//! error (the first rule that fails), but every field is checked so that all
//! problems can be shown at once.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use intake_types::error::ValidationError;
use intake_types::value::FieldValue;

use crate::render::{InputKind, LineKind, RenderedField, RenderedTree};

use super::state::FieldState;

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Outcome of validating a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<String, ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field_id: &str) -> Option<ValidationError> {
        self.errors.get(field_id).copied()
    }

    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> BTreeMap<String, ValidationError> {
        self.errors
    }
}

/// Validate every visible field of the tree against its state.
pub fn validate(tree: &RenderedTree, states: &[FieldState]) -> ValidationReport {
    let errors = tree
        .fields()
        .iter()
        .zip(states)
        .filter(|(_, state)| state.visible)
        .filter_map(|(field, state)| {
            check_field(field, &state.value).map(|err| (field.id.clone(), err))
        })
        .collect();
    ValidationReport { errors }
}

/// First failing rule for a visible field, if any.
pub fn check_field(field: &RenderedField, value: &FieldValue) -> Option<ValidationError> {
    if !field.required {
        return None;
    }
    if value.is_empty() {
        return Some(ValidationError::Required);
    }

    match &field.input {
        InputKind::Line(LineKind::Email) if !is_valid_email(&value.as_joined()) => {
            Some(ValidationError::InvalidEmail)
        }
        InputKind::Line(LineKind::Tel) if !is_valid_phone(&value.as_joined()) => {
            Some(ValidationError::InvalidPhone)
        }
        InputKind::Line(_)
        | InputKind::MultiLine
        | InputKind::Select { .. }
        | InputKind::Radio { .. }
        | InputKind::Checkbox { .. } => None,
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// At least [`MIN_PHONE_DIGITS`] digits once every non-digit is stripped.
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}
