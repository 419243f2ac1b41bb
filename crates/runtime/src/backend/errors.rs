use thiserror::Error;

/// Errors from calls to the remote event API.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("network: {0}")]
    Network(String),

    /// The API rejected the bearer token or credentials (401/403).
    #[error("unauthorized ({status})")]
    Unauthorized { status: u16 },

    /// The API answered with any other non-success status.
    #[error("api returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be parsed as the expected shape.
    #[error("invalid api response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the API refused the token or credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
