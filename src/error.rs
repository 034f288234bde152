use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing scope identifier")]
    MissingScope,

    #[error("Invalid scope identifier: {0}")]
    InvalidScope(String),

    #[error("Snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SnapshotParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
