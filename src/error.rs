//! Error handling for the storefront client

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the storefront client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport errors raised by the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a non-success status.
    ///
    /// The display form is the extracted message and nothing else, so callers
    /// can show it to users as-is.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Best available human-readable message
        message: String,
        /// Parsed error body, when the body was valid JSON
        details: Option<serde_json::Value>,
    },

    /// Authentication errors (bad token value, missing PKCE verifier)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Token storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument was rejected before any request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend rejected the request as unauthenticated
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_bare_message() {
        let err = Error::Api {
            status: 400,
            message: "out of stock".to_string(),
            details: None,
        };
        assert_eq!(err.to_string(), "out of stock");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn helpers_build_expected_variants() {
        assert!(matches!(Error::auth("x"), Error::Auth(m) if m == "x"));
        assert!(matches!(Error::storage("y"), Error::Storage(m) if m == "y"));
        assert_eq!(Error::config("z").to_string(), "Configuration error: z");
        assert_eq!(Error::config("z").status(), None);
        assert_eq!(
            Error::invalid_argument("slug is empty").to_string(),
            "Invalid argument: slug is empty"
        );
    }
}
