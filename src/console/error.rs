use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument(reason: impl Into<String>) -> Self { Self::InvalidArgument(reason.into()) }
}
