//! Error types for HTTP handlers

use hyper::StatusCode;
use imagecat::CatalogError;
use thiserror::Error;

/// Handler result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures a handler reports to the client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid query parameter or path segment
    #[error("{0}")]
    BadRequest(String),

    /// Unknown route, filename or file
    #[error("{0}")]
    NotFound(String),

    /// Known route, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Anything unexpected; the detail is only logged
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON encoding failed: {}", err))
    }
}
