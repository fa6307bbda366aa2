//! Catalog operation errors
//!
//! Every error is scoped to the single operation that raised it; none of them
//! leaves partial writes behind.

use sea_orm::DbErr;
use thiserror::Error;

use super::ValidationError;
use crate::common::db_errors::DbErrorKind;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Input rejected before any write
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced category, product or attribute does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Name already taken
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        CatalogError::NotFound { entity, id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CatalogError::Conflict(message.into())
    }

    /// Map a database error, turning unique violations into a conflict.
    pub fn from_db_conflict(err: DbErr, message: impl Into<String>) -> Self {
        match DbErrorKind::from_db_err(&err) {
            DbErrorKind::UniqueViolation => CatalogError::Conflict(message.into()),
            _ => CatalogError::Database(err),
        }
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_) | CatalogError::NotFound { .. } | CatalogError::Conflict(_)
        )
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "VALIDATION_FAILED",
            CatalogError::NotFound { .. } => "NOT_FOUND",
            CatalogError::Conflict(_) => "CONFLICT",
            CatalogError::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            CatalogError::Validation(_) => 400,
            CatalogError::NotFound { .. } => 404,
            CatalogError::Conflict(_) => 409,
            CatalogError::Database(err) => DbErrorKind::from_db_err(err).http_status_code(),
        }
    }
}
