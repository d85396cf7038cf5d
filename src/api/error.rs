//! API error types for the Backlog client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the Backlog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service could not be reached at all (DNS, connect, timeout).
    #[error("Network error: Unable to connect to {domain}. Check your internet connection and domain.")]
    Network {
        /// The configured domain the request was sent to.
        domain: String,
        /// The underlying transport error, stripped of its URL.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP 400.
    #[error("API Error 400 (Bad Request - Check your parameters): {0}")]
    BadRequest(String),

    /// HTTP 401 - invalid or missing API key.
    #[error("API Error 401 (Unauthorized - Check your API key): {0}")]
    Unauthorized(String),

    /// HTTP 403.
    #[error("API Error 403 (Forbidden - You don't have permission): {0}")]
    Forbidden(String),

    /// HTTP 404.
    #[error("API Error 404 (Not Found - Resource doesn't exist or you don't have access): {0}")]
    NotFound(String),

    /// HTTP 429.
    #[error("API Error 429 (Rate Limited - Too many requests, please wait): {0}")]
    RateLimited(String),

    /// HTTP 500.
    #[error("API Error 500 (Internal Server Error - Backlog server issue): {0}")]
    ServerError(String),

    /// Any other non-success status.
    #[error("API Error {status}: {body}")]
    Unexpected {
        /// The numeric HTTP status.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// A success response whose body was not valid JSON.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Classify a non-success HTTP status, keeping the response body on one line.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = single_line(body);
        match status.as_u16() {
            400 => ApiError::BadRequest(body),
            401 => ApiError::Unauthorized(body),
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            429 => ApiError::RateLimited(body),
            500 => ApiError::ServerError(body),
            status => ApiError::Unexpected { status, body },
        }
    }

    /// The HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited(_) => Some(429),
            ApiError::ServerError(_) => Some(500),
            ApiError::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Escape line breaks so the text fits on a single output line.
pub fn single_line(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}
