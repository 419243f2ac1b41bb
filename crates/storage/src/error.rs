use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid timestamp for key '{key}': {value}")]
    InvalidTimestamp { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
