//! Error taxonomy for every call made through the client.

use thiserror::Error;

use crate::validation::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or timeout failure reaching the upstream, after transport retries.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token exchange itself failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The upstream rejected the attached token on the retry as well.
    #[error("{code}: {message}")]
    InvalidToken { code: i64, message: String },

    /// Any other non-success business code.
    #[error("{code}: {message}")]
    Business { code: i64, message: String },

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The response envelope was successful but `result` did not fit the expected type.
    #[error("decoding response failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token request rejected, {code}: {message}")]
    Rejected { code: i64, message: String },

    #[error("token response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("token response carries no access token")]
    MissingToken,
}

pub(crate) const OK: i64 = 200;
pub(crate) const OK_ALT: i64 = 0;
pub(crate) const INTERNAL_ERROR: i64 = 500;

/// Success codes of the upstream envelope.
pub(crate) fn is_success(code: i64) -> bool {
    code == OK || code == OK_ALT
}

/// Normalises an upstream message, substituting a default when it is missing.
pub(crate) fn business_message(code: i64, message: &str) -> String {
    let message = message.trim();
    match (code, message.is_empty()) {
        (INTERNAL_ERROR, true) => "internal error, please contact support".to_owned(),
        (_, true) => "unknown error".to_owned(),
        (_, false) => message.to_owned(),
    }
}

impl Error {
    pub(crate) fn business(code: i64, message: &str) -> Self {
        Error::Business {
            code,
            message: business_message(code, message),
        }
    }

    /// Upstream business code, when the error carries one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::InvalidToken { code, .. } | Error::Business { code, .. } => Some(*code),
            Error::Auth(AuthError::Rejected { code, .. }) => Some(*code),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
