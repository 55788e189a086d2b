//! Table-driven field validation and derived fields.
//!
//! Each record declares a static table of [`FieldSpec`]s; [`validate`] walks the
//! table and collects one message per failing field.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::Resource;

/// Field name (wire name) to human-readable message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Sentinel for a dropdown with nothing selected.
pub const UNSELECTED: i64 = 0;

/// Wire format for dates of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A field value as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Id(i64),
}

/// Validation rule for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-empty after trimming; the label names the field in the message
    Required(&'static str),
    Phone,
    Email,
    DateOfBirth,
    Age,
    /// Foreign key picked from a dropdown
    Selection(&'static str),
}

/// One row of a record's validation table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub const fn new(name: &'static str, rule: FieldRule) -> Self {
        Self { name, rule }
    }
}

impl FieldRule {
    /// Check a value, returning the message on failure.
    pub fn check(&self, value: FieldValue<'_>) -> Option<String> {
        match (self, value) {
            (FieldRule::Required(label), FieldValue::Text(text)) => {
                text.trim().is_empty().then(|| format!("{label} is required"))
            }
            (FieldRule::Phone, FieldValue::Text(text)) => {
                (!is_digits(text)).then(|| "Please enter a valid phone number".to_string())
            }
            (FieldRule::Email, FieldValue::Text(text)) => {
                if text.is_empty() {
                    Some("Email is required".to_string())
                } else if !is_email_shape(text) {
                    Some("Invalid email format".to_string())
                } else {
                    None
                }
            }
            (FieldRule::DateOfBirth, FieldValue::Text(text)) => text
                .trim()
                .is_empty()
                .then(|| "Date of Birth is required".to_string()),
            (FieldRule::Age, FieldValue::Text(text)) => {
                (!is_digits(text)).then(|| "Please enter a valid age".to_string())
            }
            (FieldRule::Selection(label), FieldValue::Id(id)) => {
                (id == UNSELECTED).then(|| format!("{label} is required"))
            }
            (FieldRule::Selection(label), FieldValue::Text(text)) => {
                let id = text.trim().parse::<i64>().unwrap_or(UNSELECTED);
                (id == UNSELECTED).then(|| format!("{label} is required"))
            }
            (rule, FieldValue::Id(id)) => rule.check(FieldValue::Text(&id.to_string())),
        }
    }
}

/// Run every rule of the record's table over the draft.
pub fn validate<R: Resource>(draft: &R) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in R::FIELDS {
        let Some(value) = draft.field(spec.name) else {
            continue;
        };
        if let Some(message) = spec.rule.check(value) {
            errors.insert(spec.name, message);
        }
    }
    errors
}

/// One or more ASCII digits.
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Basic `local@domain.tld` shape, not RFC 5322.
pub fn is_email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Parse a selection value from a dropdown; anything unparseable is unselected.
pub fn parse_selection(value: &str) -> i64 {
    value.trim().parse().unwrap_or(UNSELECTED)
}

/// Whole years elapsed, counting this year only once the birthday has passed.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - date_of_birth.year();
    let birthday_passed =
        (today.month(), today.day()) >= (date_of_birth.month(), date_of_birth.day());
    if birthday_passed {
        years
    } else {
        years - 1
    }
}

/// Age string for a date-of-birth input; empty when the date does not parse.
pub fn derive_age(date_of_birth: &str, today: NaiveDate) -> String {
    match NaiveDate::parse_from_str(date_of_birth.trim(), DATE_FORMAT) {
        Ok(dob) => age_on(dob, today).to_string(),
        Err(_) => String::new(),
    }
}
