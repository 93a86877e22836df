//! Error types for the 51Tracking client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::constants::*;
use crate::validate::Failures;

#[derive(Debug, Error)]
/// Error type for all 51Tracking client operations.
pub enum Error {
    /// Underlying HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not valid JSON for the expected envelope.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    /// The API reported a non-success code in the response envelope.
    #[error("{code}: {message}")]
    Api { code: i32, message: String },
    /// A request failed local validation and was never sent.
    #[error("invalid request: {0}")]
    Validation(Failures),
    /// Rate limited beyond the configured retry budget.
    #[error("rate limited after {attempts} retries: {last}")]
    RetryExhausted { attempts: u32, last: Box<Error> },
    /// HTTP response returned a non-success status with body.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// Client construction failed.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Wraps an envelope code into an [`Error::Api`], resolving the message
    /// through the catalog and falling back to the body's own message for
    /// codes the catalog does not know.
    pub fn api(code: i32, message: impl Into<String>) -> Self {
        let message = match catalog_message(code) {
            Some(canonical) => canonical.to_string(),
            None => message.into(),
        };
        Error::Api { code, message }
    }
}

impl From<Failures> for Error {
    fn from(failures: Failures) -> Self {
        Error::Validation(failures)
    }
}

/// Canonical message for a recognized envelope code.
pub fn catalog_message(code: i32) -> Option<&'static str> {
    match code {
        PAYMENT_REQUIRED => {
            Some("the API service is only available to paid accounts")
        }
        NO_CONTENT => Some("the request succeeded but matched no data"),
        BAD_REQUEST => Some("bad request type"),
        UNAUTHORIZED => {
            Some("authorization failed, check that the API key is correct")
        }
        NOT_FOUND => Some("the page does not exist"),
        TIMED_OUT => Some("the request timed out"),
        PARAMETERS_TOO_LONG => Some("request parameter length exceeds the limit"),
        PARAMETERS_FORMAT => Some("request parameter format is invalid"),
        PARAMETERS_OVER_LIMIT => Some("request parameter count exceeds the limit"),
        TOO_MANY_REQUESTS => {
            Some("API request rate limit exceeded, try again later")
        }
        _ => None,
    }
}

/// Result type for 51Tracking client operations.
pub type Result<T> = std::result::Result<T, Error>;
