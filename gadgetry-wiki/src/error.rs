//! Error types for gadgetry-wiki.

use thiserror::Error;

/// All errors that can arise from remote wiki operations.
#[derive(Debug, Error)]
pub enum WikiError {
    /// Transport-level failure (connection refused, TLS, HTTP status).
    #[error("http error: {0}")]
    Http(#[from] ureq::Error),

    /// Failed to read or decode a response body.
    #[error("response I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with an error payload.
    #[error("api error {code}: {info}")]
    Api { code: String, info: String },

    /// The edit request went through but the API reported a non-success result.
    #[error("edit of {title} rejected: {result}")]
    EditRejected { title: String, result: String },

    /// `action=login` did not succeed.
    #[error("login failed for {username}: {reason}")]
    LoginFailed { username: String, reason: String },

    /// A response was missing an expected field.
    #[error("malformed api response: missing {what}")]
    Malformed { what: &'static str },
}
