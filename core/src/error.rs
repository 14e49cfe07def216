//! Error types for the OneID client.
//!
//! # Design
//! Only failures that stop a request from being attempted are errors:
//! a bad base URL, a body that cannot be serialized, a spec handed to the
//! wrong executor. Once a request is on its way, every result (including
//! connection failures and non-2xx statuses) comes back as a
//! `ResponseOutcome` value instead.

use thiserror::Error;

/// Errors returned before a request is dispatched.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL cannot be used to address the API.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    /// The JSON payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Query parameters or form fields could not be url-encoded.
    #[error("url encoding failed: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),

    /// The composed request URL is not a valid HTTP URI.
    #[error("invalid request url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Query parameters were added to a POST spec, which has no query string.
    #[error("POST {path} cannot carry query parameters")]
    QueryOnPost { path: String },

    /// The request spec carries a payload the chosen executor does not send.
    #[error("{executor} cannot send a {payload} payload")]
    PayloadMismatch {
        executor: &'static str,
        payload: &'static str,
    },
}

/// A failure to complete the HTTP exchange at all.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::new(err.to_string())
    }
}
