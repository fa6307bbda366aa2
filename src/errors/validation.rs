//! Input validation errors
//!
//! Raised before anything is written. A validation failure never changes
//! persisted state.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required name was missing or blank
    #[error("{0} required")]
    Required(&'static str),

    /// Attribute type outside text | number | boolean | date
    #[error("data_type must be text | number | boolean | date, got '{0}'")]
    InvalidType(String),

    #[error("'{0}' is not a valid number")]
    MalformedNumber(String),

    #[error("'{0}' is not a valid boolean (expected true/false/1/0/on/off)")]
    MalformedBoolean(String),

    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    MalformedDate(String),

    #[error("'{0}' is not a valid price")]
    MalformedPrice(String),

    #[error("'{0}' is not a valid category id")]
    MalformedCategoryId(String),
}

impl ValidationError {
    /// Machine readable kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Required(_) => "required",
            ValidationError::InvalidType(_) => "invalid_type",
            ValidationError::MalformedNumber(_) => "malformed_number",
            ValidationError::MalformedBoolean(_) => "malformed_boolean",
            ValidationError::MalformedDate(_) => "malformed_date",
            ValidationError::MalformedPrice(_) => "malformed_price",
            ValidationError::MalformedCategoryId(_) => "malformed_category_id",
        }
    }
}
