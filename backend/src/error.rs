//! Error handling for the Tranche Monitor
//!
//! JSON error bodies for the API routes, HTML error pages for the browser routes

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::views;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Upstream subgraph errors
    #[error("Subgraph error: {0}")]
    Subgraph(String),

    #[error("Subgraph response could not be parsed: {0}")]
    SubgraphParse(String),

    #[error("Subgraph unavailable: {0}")]
    SubgraphUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidAddress(_)
            | AppError::InvalidQuery(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Subgraph(_) | AppError::SubgraphParse(_) => StatusCode::BAD_GATEWAY,
            AppError::SubgraphUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidAddress(_) => "INVALID_ADDRESS",
            AppError::InvalidQuery(_) => "INVALID_QUERY",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Subgraph(_) => "SUBGRAPH_ERROR",
            AppError::SubgraphParse(_) => "SUBGRAPH_PARSE_ERROR",
            AppError::SubgraphUnavailable(_) => "SUBGRAPH_UNAVAILABLE",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to a client
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidAddress(_) => {
                "Given id could not be formatted to Ethereum Address".to_string()
            }
            AppError::InvalidQuery(msg) => format!("Invalid query: {}", msg),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::Subgraph(msg) => format!("Subgraph returned an error: {}", msg),
            AppError::SubgraphParse(_) => {
                "Subgraph returned data in an unexpected format".to_string()
            }
            AppError::SubgraphUnavailable(_) => {
                "Subgraph is temporarily unavailable".to_string()
            }
            AppError::Configuration(msg) => format!("Configuration error: {}", msg),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let detail = ErrorDetail {
            code: self.code().to_string(),
            message: self.public_message(),
        };
        (self.status(), Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Error rendered as an HTML page, for the browser-facing routes
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        PageError(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let error = self.0;
        error.log();

        let status = error.status();
        let body = views::error_page(status, &error.public_message());
        (status, Html(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for HTML page handlers
pub type PageResult<T> = Result<T, PageError>;
