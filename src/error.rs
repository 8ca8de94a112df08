//! Error types shared across the pipeline.

use thiserror::Error;

/// Errors a pipeline operation can return to its caller.
///
/// Ambiguous or unknown places are not errors; they come back as
/// [`crate::resolver::Resolution`] variants so callers can always render a
/// next step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// Malformed arguments. Not worth retrying.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl QuoteError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QuoteError::InvalidInput(message.into())
    }
}

/// Failure talking to an external collaborator (geocoder, router, fleet).
///
/// Never surfaced past the core: routing degrades to the straight-line
/// estimate and geocoding to a `NotFound` resolution.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
