use crate::backend::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("authentication response did not include a token")]
    MissingToken,

    #[error("authentication response did not include a user")]
    MissingUser,

    #[error("not logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Storage(#[from] storage::Error),

    #[error("failed to encode stored session: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the server refused the current token or credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
