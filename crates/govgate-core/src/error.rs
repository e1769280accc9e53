//! Shared error type across govgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request body.
    BadRequest,
    /// Policy document failed structural validation.
    InvalidPolicy,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Evaluation did not finish in time.
    Timeout,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidPolicy => "INVALID_POLICY",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GovError>;

/// Unified error type used by core and gateway.
///
/// None of these ever reach a decision reason: the engine folds them into a
/// generic denial and only logs the text.
#[derive(Debug, Error)]
pub enum GovError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
    #[error("policy store: {0}")]
    Store(String),
    #[error("malformed policy {key}: {msg}")]
    MalformedPolicy { key: String, msg: String },
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("evaluation timed out")]
    Timeout,
    #[error("internal: {0}")]
    Internal(String),
}

impl GovError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GovError::BadRequest(_) => ClientCode::BadRequest,
            GovError::InvalidPolicy(_) => ClientCode::InvalidPolicy,
            GovError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GovError::Timeout => ClientCode::Timeout,
            GovError::Store(_) | GovError::MalformedPolicy { .. } | GovError::Internal(_) => {
                ClientCode::Internal
            }
        }
    }
}
