//! Errors surfaced by authentication, refresh evaluation and transport setup.

use thiserror::Error;

/// Every failure the token provider can report.
///
/// None of these are retried internally; the operation that produced the
/// error returns it to its caller as-is.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity service answered with a non-success status.
    #[error("{status}: {body}")]
    Protocol { status: String, body: String },

    /// Request body could not be serialized.
    #[error("failed to marshal authentication request: {0}")]
    Marshal(#[source] serde_json::Error),

    /// Transport-level failure reaching the identity service.
    #[error("identity service unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// A cached token timestamp is not valid RFC 3339.
    #[error("malformed token timestamp '{value}': {source}")]
    TimeParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// CA, certificate or key material could not be loaded.
    #[error("tls configuration error ({path}): {reason}")]
    TlsConfig { path: String, reason: String },

    /// Success status, but the response does not describe a complete token.
    #[error("invalid identity service response: {0}")]
    InvalidResponse(String),

    /// The token id cannot be carried in an HTTP header.
    #[error("invalid auth header value: {0}")]
    InvalidHeader(String),
}

impl AuthError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Protocol { .. } => "protocol",
            AuthError::Marshal(_) => "marshal",
            AuthError::Network(_) => "network",
            AuthError::TimeParse { .. } => "time_parse",
            AuthError::TlsConfig { .. } => "tls_config",
            AuthError::InvalidResponse(_) => "invalid_response",
            AuthError::InvalidHeader(_) => "invalid_header",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
