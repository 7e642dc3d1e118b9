//! Error types for gist-downloader
//!
//! Errors fall into three groups:
//! - Setup and input errors (bad configuration, malformed user URL) abort the run
//! - Listing errors ([`FetchError`]) abort the run, no partial listing is used
//! - Per-gist errors ([`MaterializeError`]) are counted in the summary and never abort

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gist-downloader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gist-downloader
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "workers")
        key: Option<String>,
    },

    /// The user URL could not be parsed
    #[error("invalid user URL: {0}")]
    InvalidUrl(#[from] UrlError),

    /// Listing the user's gists failed
    #[error("failed to fetch gists: {0}")]
    Fetch(#[from] FetchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External tool execution failed (git)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a configuration key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Machine-readable error code, used as a structured log field
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidUrl(_) => "invalid_url",
            Error::Fetch(e) => e.error_code(),
            Error::Io(_) => "io_error",
            Error::ExternalTool(_) => "external_tool_error",
            Error::NotSupported(_) => "not_supported",
        }
    }
}

/// User URL parsing errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// Not a URL at all
    #[error("{0}")]
    Parse(#[from] url::ParseError),

    /// URL points at some other host
    #[error("expected {expected} host, got {found}")]
    WrongHost {
        /// The host the URL must use
        expected: String,
        /// The host that was found (empty when the URL has none)
        found: String,
    },

    /// URL has no first path segment
    #[error("could not extract username from URL")]
    MissingUsername,
}

/// Gist listing errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered 404 for the user
    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// The API rejected the supplied token (401)
    #[error("unauthorized: invalid token")]
    Unauthorized,

    /// The API refused the request (403), usually the anonymous rate limit
    #[error("rate limit exceeded, provide a GitHub token with --token")]
    RateLimited,

    /// Any other non-success status
    #[error("API error: HTTP {status}")]
    Api {
        /// The HTTP status code returned by the API
        status: u16,
    },

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Machine-readable error code, used as a structured log field
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::UserNotFound(_) => "user_not_found",
            FetchError::Unauthorized => "unauthorized",
            FetchError::RateLimited => "rate_limited",
            FetchError::Api { .. } => "api_error",
            FetchError::Network(_) => "network_error",
            FetchError::Decode(_) => "decode_error",
        }
    }
}

/// Errors from cloning a single gist
///
/// Callers branch on the variant: [`MaterializeError::AlreadyExists`] is counted
/// as skipped, everything else as failed.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// Something already exists at the target path; nothing was touched
    #[error("already exists: {}", path.display())]
    AlreadyExists {
        /// The target path that was found occupied
        path: PathBuf,
    },

    /// Directory creation or the clone itself failed
    #[error("clone failed: {0}")]
    CloneFailed(String),
}
