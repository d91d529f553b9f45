//! Field-level validation errors.
//!
//! Messages follow the wording REST clients of this API already match on
//! (`"This field is required."` and friends), keyed by the wire field name.

use std::collections::BTreeMap;

use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";

pub fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Accumulated validation failures, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a map holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Check a text field.
    ///
    /// `None` means the field was absent from the request; that is an error
    /// only when `required` is set. `Some(None)` is an explicit `null`, which a
    /// text field never accepts. Present values are checked after trimming:
    /// they must be non-blank and at most `max_chars` characters long.
    pub fn check_text(
        &mut self,
        field: &str,
        value: Option<Option<&str>>,
        max_chars: usize,
        required: bool,
    ) {
        match value {
            None if required => self.add(field, REQUIRED),
            None => {}
            Some(None) => self.add(field, NULL),
            Some(Some(v)) => {
                let v = v.trim();
                if v.is_empty() {
                    self.add(field, BLANK);
                } else if v.chars().count() > max_chars {
                    self.add(field, too_long(max_chars));
                }
            }
        }
    }
}

/// Surrounding whitespace is dropped from text fields before they are stored.
pub fn trim_text(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|v| v.map(|s| s.trim().to_owned()))
}
