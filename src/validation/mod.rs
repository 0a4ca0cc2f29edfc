//! Local request validation.
//!
//! Violations are collected per field instead of failing on the first one, so a
//! caller sees every problem with a request at once. Rendering is always sorted
//! by field name; nested structures are flattened to `parent.child` keys.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

/// Date-time layout the upstream accepts in query filters.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. Only the first message per field is kept.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Merges the errors of a nested structure under `prefix`.
    pub fn nest(&mut self, prefix: &str, nested: ValidationErrors) {
        for (field, message) in nested.0 {
            self.add(format!("{prefix}.{field}"), message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Flags an empty (after trimming) value. Returns whether the value is present.
    pub(crate) fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
            return false;
        }
        true
    }

    pub(crate) fn required_when(&mut self, condition: bool, field: &str, value: &str) {
        if condition {
            self.required(field, value);
        }
    }

    pub(crate) fn char_range(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let chars = value.chars().count();
        if chars < min || chars > max {
            if min <= 1 {
                self.add(field, format!("must not exceed {max} characters"));
            } else {
                self.add(field, format!("length must be between {min} and {max} characters"));
            }
        }
    }

    /// Length check for optional fields: skipped when the value is absent or empty.
    pub(crate) fn optional_char_range(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.char_range(field, value, 1, max);
        }
    }

    pub(crate) fn one_of<T>(&mut self, field: &str, value: &T, allowed: &[T])
    where
        T: PartialEq + fmt::Display,
    {
        if !allowed.contains(value) {
            let allowed = allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.add(field, format!("must be one of [{allowed}], got '{value}'"));
        }
    }

    pub(crate) fn date_time(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            if NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).is_err() {
                self.add(field, "must use the 'YYYY-MM-DD HH:MM:SS' format");
            }
        }
    }

    pub(crate) fn positive(&mut self, field: &str, value: f64) {
        if !(value > 0.0) {
            self.add(field, "must be greater than zero");
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

impl std::error::Error for ValidationErrors {}
