//! Typed parsing of URL-encoded form posts.
//!
//! Each form has an explicit parse function that reads fields one by one
//! through a [`FormReader`] and returns either the typed request or the
//! collected [`FieldErrors`]. Handlers re-render the originating page with
//! those errors and the submitted values.

pub mod api_client;
pub mod branch;
pub mod currency;
pub mod dsa;
pub mod fee;
pub mod partner;
pub mod revenue;
pub mod role;

use crate::models::money::parse_hundredths;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const REQUIRED: &str = "This field is required";
pub const INVALID_AMOUNT: &str = "Enter an amount with at most two decimals";
pub const INVALID_DATE: &str = "Enter a date as YYYY-MM-DD";
pub const END_BEFORE_START: &str = "End date must not be before start date";

/// Form field carrying the CSRF token; never echoed or parsed.
const CSRF_FIELD: &str = "csrf_token";

/// Decoded form body. Repeated names keep every value in order.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<String, Vec<String>>,
}

impl FormFields {
    /// First non-empty trimmed value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)?
            .iter()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// Every non-empty trimmed value for `name`.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.values
            .get(name)
            .map(|values| values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Whether a checkbox-style marker was submitted.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.eq_ignore_ascii_case("false") && v != "0")
    }

    /// Submitted values to prefill a re-rendered form.
    pub fn echo(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .filter(|(name, _)| name.as_str() != CSRF_FIELD)
            .filter_map(|(name, values)| values.first().map(|v| (name.clone(), v.trim().to_string())))
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            values.entry(name).or_default().push(value);
        }
        Self { values }
    }
}

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record an error; the first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Reads fields from a form while collecting validation errors.
pub struct FormReader<'a> {
    fields: &'a FormFields,
    errors: FieldErrors,
}

impl<'a> FormReader<'a> {
    pub fn new(fields: &'a FormFields) -> Self {
        Self {
            fields,
            errors: FieldErrors::default(),
        }
    }

    pub fn fields(&self) -> &'a FormFields {
        self.fields
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains(field)
    }

    pub fn optional(&self, name: &str) -> String {
        self.fields.get(name).unwrap_or_default().to_string()
    }

    pub fn required(&mut self, name: &str) -> String {
        match self.fields.get(name) {
            Some(value) => value.to_string(),
            None => {
                self.errors.add(name, REQUIRED);
                String::new()
            }
        }
    }

    /// Required string no longer than `max` characters.
    pub fn required_max(&mut self, name: &str, max: usize) -> String {
        let value = self.required(name);
        if value.chars().count() > max {
            self.errors.add(name, format!("Must be at most {max} characters"));
        }
        value
    }

    /// Required decimal amount in hundredths.
    pub fn hundredths(&mut self, name: &str) -> i64 {
        match self.fields.get(name) {
            None => {
                self.errors.add(name, REQUIRED);
                0
            }
            Some(raw) => parse_hundredths(raw).unwrap_or_else(|| {
                self.errors.add(name, INVALID_AMOUNT);
                0
            }),
        }
    }

    /// Optional `YYYY-MM-DD` date; a malformed value is an error.
    pub fn date(&mut self, name: &str) -> Option<NaiveDate> {
        let raw = self.fields.get(name)?;
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.add(name, INVALID_DATE);
                None
            }
        }
    }

    pub fn required_date(&mut self, name: &str) -> Option<NaiveDate> {
        if self.fields.get(name).is_none() {
            self.errors.add(name, REQUIRED);
            return None;
        }
        self.date(name)
    }

    /// Check that an end date does not precede its start date.
    pub fn date_range(&mut self, end_field: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.errors.add(end_field, END_BEFORE_START);
            }
        }
    }

    /// Client-supplied repeat count, bounded by `max`.
    ///
    /// Counts above `max` are rejected rather than truncated so staff never
    /// lose rows silently.
    pub fn count(&mut self, name: &str, max: usize) -> usize {
        let Some(raw) = self.fields.get(name) else {
            return 0;
        };
        match raw.parse::<usize>() {
            Ok(count) if count <= max => count,
            Ok(_) => {
                self.errors.add(name, format!("At most {max} rows are allowed"));
                0
            }
            Err(_) => {
                self.errors.add(name, "Enter a whole number");
                0
            }
        }
    }

    /// Hand back the parsed value, or every collected error.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
pub(crate) fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        let form = fields(&[("name", "  "), ("name", "Acme"), ("flag", "on")]);
        assert_eq!(form.get("name"), Some("Acme"));
        assert!(form.has("flag"));
        assert!(!form.has("other"));
    }

    #[test]
    fn echo_skips_csrf_token() {
        let form = fields(&[("csrf_token", "secret"), ("name", " Acme ")]);
        let echo = form.echo();
        assert_eq!(echo.get("name").map(String::as_str), Some("Acme"));
        assert!(!echo.contains_key("csrf_token"));
    }

    #[test]
    fn reader_collects_errors() {
        let form = fields(&[("amount", "1.234"), ("start", "2024-05-01"), ("end", "2024-04-01")]);
        let mut reader = FormReader::new(&form);
        reader.required("name");
        reader.hundredths("amount");
        let start = reader.required_date("start");
        let end = reader.required_date("end");
        reader.date_range("end", start, end);

        let errors = reader.finish(()).unwrap_err();
        assert_eq!(errors.get("name"), Some(REQUIRED));
        assert_eq!(errors.get("amount"), Some(INVALID_AMOUNT));
        assert_eq!(errors.get("end"), Some(END_BEFORE_START));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn count_is_bounded() {
        let form = fields(&[("rows", "3"), ("too_many", "1000000"), ("junk", "x")]);
        let mut reader = FormReader::new(&form);
        assert_eq!(reader.count("rows", 50), 3);
        assert_eq!(reader.count("missing", 50), 0);
        assert_eq!(reader.count("too_many", 50), 0);
        assert_eq!(reader.count("junk", 50), 0);
        let errors = reader.finish(()).unwrap_err();
        assert!(errors.contains("too_many"));
        assert!(errors.contains("junk"));
    }
}
