use round::bank::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Round(#[from] round::ErrorKind),
    #[error(transparent)]
    Bank(#[from] LoadError),
    #[error("roster request failed: {0}")]
    Roster(#[from] reqwest::Error),
    #[error("roster record unreadable: {0}")]
    Record(#[from] serde_json::Error),
    #[error("binding {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

pub type RoomResult<T> = Result<T, ErrorKind>;
