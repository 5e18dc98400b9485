use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("no data")]
    NoData,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
