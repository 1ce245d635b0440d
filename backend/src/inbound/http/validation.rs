//! Shared validation helpers for inbound HTTP adapters.
//!
//! Serde handles shape and type errors; these helpers cover the value
//! constraints serde cannot express, attaching the offending field to the
//! error details.

use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

/// Require a non-empty, non-blank string.
pub(crate) fn require_non_empty(value: &str, field: FieldName) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(field_error(
            field,
            format!("{} must not be empty", field.as_str()),
            "empty_field",
        ));
    }
    Ok(())
}

/// Require a percentage in the inclusive 0–100 range.
pub(crate) fn require_percentage(value: f64, field: FieldName) -> Result<(), Error> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(field_error(
            field,
            format!("{} must be between 0 and 100", field.as_str()),
            "out_of_range",
        ));
    }
    Ok(())
}

/// Require a positive round count.
pub(crate) fn require_positive(value: i32, field: FieldName) -> Result<(), Error> {
    if value < 1 {
        return Err(field_error(
            field,
            format!("{} must be at least 1", field.as_str()),
            "out_of_range",
        ));
    }
    Ok(())
}

/// Require an ordered, non-negative compensation range.
pub(crate) fn require_ordered_range(min: f64, max: f64, field: FieldName) -> Result<(), Error> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(field_error(
            field,
            format!("{} must satisfy 0 <= min <= max", field.as_str()),
            "invalid_range",
        ));
    }
    Ok(())
}

/// Require a non-empty list.
pub(crate) fn require_non_empty_list<T>(values: &[T], field: FieldName) -> Result<(), Error> {
    if values.is_empty() {
        return Err(field_error(
            field,
            format!("{} must not be empty", field.as_str()),
            "empty_field",
        ));
    }
    Ok(())
}
