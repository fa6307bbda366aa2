//! Error types for catalog operations
//!
//! # Error Categories
//!
//! - **ValidationError**: rejected input (missing names, malformed typed values,
//!   unknown attribute types)
//! - **CatalogError**: every failure an operation can surface, wrapping validation
//!   failures alongside not-found, conflict and database errors
//!
//! # Examples
//!
//! ```rust
//! use catalog::errors::{CatalogError, ValidationError};
//!
//! let err: CatalogError = ValidationError::MalformedNumber("ten".to_string()).into();
//! assert!(err.is_client_error());
//! assert_eq!(err.http_status_code(), 400);
//!
//! let err = CatalogError::not_found("Category", 42);
//! assert!(err.is_not_found());
//! ```

pub mod catalog;
pub mod validation;

pub use catalog::CatalogError;
pub use validation::ValidationError;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
