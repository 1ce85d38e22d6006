//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to parse KOHA_STATIC_ATTRIBUTES entry '{0}'. Expected format type=value.")]
    StaticAttribute(String),
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("Either DB_CONNECTION_STRING or DB_DSN must be provided for the database connection.")]
    MissingDatabase,
    #[error("invalid database connection string: {0}")]
    ConnectionString(String),
}

/// A source record could not be turned into a patron payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Missing required field(s) in record: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("database: connection timed out after {0}s")]
    ConnectTimeout(u64),
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Mapping(_) => (StatusCode::INTERNAL_SERVER_ERROR, "mapping_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Db(_) | AppError::ConnectTimeout(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_every_field() {
        let err = MappingError::MissingFields(vec!["reg_no", "surname"]);
        assert_eq!(
            err.to_string(),
            "Missing required field(s) in record: reg_no, surname"
        );
    }

    #[test]
    fn mapping_error_keeps_its_message_through_app_error() {
        let err: AppError = MappingError::MissingFields(vec!["first_name"]).into();
        assert_eq!(err.to_string(), "Missing required field(s) in record: first_name");
        assert_eq!(err.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "mapping_error"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound("student with reg_no 'X'".into());
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
    }
}
