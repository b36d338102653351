//! Error types for the cat API
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ValidationErrors;

// == Cat Error Enum ==
/// Unified error type for the cat API.
#[derive(Error, Debug)]
pub enum CatError {
    /// One or more required attributes were blank
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No cat exists with the requested id
    #[error("Couldn't find Cat with 'id'={0}")]
    NotFound(String),

    /// The request body did not carry the named parameter envelope
    #[error("param is missing or the value is empty: {0}")]
    ParameterMissing(&'static str),

    /// The request body was not a JSON document axum could extract
    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),

    /// The snapshot file could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ValidationErrors> for CatError {
    fn from(errors: ValidationErrors) -> Self {
        CatError::Validation(errors)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Validation errors render as the bare field map
            CatError::Validation(errors) => {
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors.clone())).into_response();
            }
            CatError::NotFound(_) => StatusCode::NOT_FOUND,
            CatError::ParameterMissing(_) => StatusCode::BAD_REQUEST,
            CatError::MalformedBody(rejection) => rejection.status(),
            CatError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cat API.
pub type Result<T> = std::result::Result<T, CatError>;
