use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::errors::CatalogError;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match &self {
            CatalogError::Database(_) => {
                tracing::error!("Database error: {}", self);
            }
            CatalogError::Conflict(_) => {
                tracing::warn!("Conflict error: {}", self);
            }
            CatalogError::Validation(_) | CatalogError::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = StatusCode::from_u16(self.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Database details stay in the log
        let message = match &self {
            CatalogError::Database(_) => "Database error occurred".to_string(),
            other => other.to_string(),
        };

        let mut body = json!({
            "error": self.error_code(),
            "message": message,
        });
        if let CatalogError::Validation(err) = &self {
            body["kind"] = json!(err.kind());
        }

        (status, Json(body)).into_response()
    }
}
