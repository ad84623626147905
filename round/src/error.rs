use protocol::Phase;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("not permitted while {0:?}")]
    InvalidPhase(Phase),
    #[error("{found} participant(s) registered, at least {required} needed")]
    InsufficientPlayers { found: usize, required: usize },
    #[error("question {index} out of range for a bank of {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("time limit must be at least one second")]
    InvalidLimit,
    #[error("no option selected")]
    NoSelection,
    #[error("option {index} not offered, question has {count}")]
    InvalidOption { index: usize, count: usize },
}

pub type RoundResult<T> = Result<T, ErrorKind>;
