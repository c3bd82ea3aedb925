use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use query::QueryError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("Malformed query string: {0}")]
    QueryString(#[from] QueryRejection),
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(err) => {
                tracing::debug!(error = %err, "Rejected request parameters.");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::QueryString(rejection) => {
                tracing::debug!(error = %rejection, "Rejected query string.");
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
            AppError::Query(QueryError::NotFound(iso3)) => {
                tracing::debug!(iso3 = %iso3, "Unknown country requested.");
                (StatusCode::NOT_FOUND, "Country not found".to_string())
            }
            AppError::Query(QueryError::DataIntegrity(detail)) => {
                tracing::error!(detail = %detail, "Stored data failed to parse.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Query(QueryError::StorageUnavailable(db_err)) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
