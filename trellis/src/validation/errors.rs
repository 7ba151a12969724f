//! Per-field error messages for a form.

use std::collections::HashMap;

use crate::input::InputKind;

use super::rules::validate_field;

/// Current error message per field name.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error for a field, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Remove the error for a field.
    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Validate `value` and store or clear the field's error.
    /// Returns the error message, if any.
    pub fn validate(&mut self, field: &str, value: &str, kind: InputKind) -> Option<String> {
        match validate_field(value, kind) {
            Some(message) => {
                self.set(field, message.clone());
                Some(message)
            }
            None => {
                self.clear(field);
                None
            }
        }
    }
}
