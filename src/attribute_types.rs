//! Declared attribute types and the value validator.
//!
//! Every attribute carries one of four declared types. Submitted values are always
//! raw text; the validator decides whether a given text is acceptable for a type.
//! Values are stored as text regardless of type.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Date pattern accepted for `date` attributes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tokens accepted by a `boolean` attribute, compared after lowercasing.
pub const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "1", "0", "on", "off"];

/// Raw submissions that normalise to `"true"`. Compared case-sensitively.
pub const TRUTHY_TOKENS: [&str; 3] = ["on", "true", "1"];

/// Form key prefix for attribute value submissions.
pub const ATTRIBUTE_FIELD_PREFIX: &str = "attr_";

type Validator = fn(&str) -> Result<(), ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
}

impl AttributeType {
    pub const ALL: [AttributeType; 4] = [
        AttributeType::Text,
        AttributeType::Number,
        AttributeType::Boolean,
        AttributeType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
        }
    }

    fn validator(&self) -> Validator {
        match self {
            AttributeType::Text => validate_text,
            AttributeType::Number => validate_number,
            AttributeType::Boolean => validate_boolean,
            AttributeType::Date => validate_date,
        }
    }

    /// Check a raw value against this type.
    pub fn validate(&self, raw: &str) -> Result<(), ValidationError> {
        (self.validator())(raw)
    }

    /// Parse a submitted type name, falling back to `text` when none was given.
    ///
    /// The name is lowercased before it is matched, so `"Number"` is accepted.
    pub fn from_submitted(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            None | Some("") => Ok(AttributeType::default()),
            Some(name) => name.parse(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        AttributeType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ValidationError::InvalidType(s.to_string()))
    }
}

fn validate_text(_raw: &str) -> Result<(), ValidationError> {
    Ok(())
}

fn validate_number(raw: &str) -> Result<(), ValidationError> {
    strip_digit_separators(raw.trim())
        .and_then(|number| number.parse::<f64>().ok())
        .map(|_| ())
        .ok_or_else(|| ValidationError::MalformedNumber(raw.to_string()))
}

/// Drop `_` separators, which are only allowed between two digits (`1_000`).
fn strip_digit_separators(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });

    separators_ok.then(|| raw.replace('_', ""))
}

fn validate_boolean(raw: &str) -> Result<(), ValidationError> {
    let lowered = raw.to_lowercase();
    if BOOLEAN_TOKENS.contains(&lowered.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::MalformedBoolean(raw.to_string()))
    }
}

fn validate_date(raw: &str) -> Result<(), ValidationError> {
    if !has_date_shape(raw) {
        return Err(ValidationError::MalformedDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::MalformedDate(raw.to_string()))
}

/// Four-digit year, then a one or two digit month and day, dash separated.
///
/// chrono alone would also take signed or short years and leading whitespace.
fn has_date_shape(raw: &str) -> bool {
    fn digits(part: &str, min: usize, max: usize) -> bool {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    }

    let mut parts = raw.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)
        }
        _ => false,
    }
}

/// Canonicalise a boolean submission.
///
/// Only the exact tokens `on`, `true` and `1` become `"true"`; anything else,
/// including an absent checkbox, becomes `"false"`.
pub fn normalize_boolean(raw: Option<&str>) -> &'static str {
    match raw {
        Some(token) if TRUTHY_TOKENS.contains(&token) => "true",
        _ => "false",
    }
}

/// Form key under which the value for an attribute is submitted.
pub fn attribute_field_key(attribute_id: i32) -> String {
    format!("{}{}", ATTRIBUTE_FIELD_PREFIX, attribute_id)
}
