//! Ordered, immutable question sets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ErrorKind, RoundResult};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;
/// Question indices travel as `u16` on the wire.
pub const MAX_QUESTIONS: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    /// Seconds allowed to answer.
    pub time_limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question bank is empty")]
    Empty,
    #[error("question bank holds {count} questions, at most 65535 allowed")]
    TooMany { count: usize },
    #[error("question {id}: time limit must be at least one second")]
    InvalidLimit { id: u32 },
    #[error("question {id}: {count} options, expected 2 to 6")]
    OptionCount { id: u32, count: usize },
    #[error("question {id}: correct option {index} is not one of the options")]
    CorrectOption { id: u32, index: usize },
}

impl Question {
    fn validate(&self) -> Result<(), LoadError> {
        if self.time_limit == 0 {
            return Err(LoadError::InvalidLimit { id: self.id });
        }
        let count = self.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(LoadError::OptionCount { id: self.id, count });
        }
        if self.correct_option >= count {
            return Err(LoadError::CorrectOption { id: self.id, index: self.correct_option });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        if questions.len() > MAX_QUESTIONS {
            return Err(LoadError::TooMany { count: questions.len() });
        }
        for q in &questions {
            q.validate()?;
        }
        Ok(Self { questions })
    }

    /// Parses a JSON array of questions.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn question_at(&self, index: usize) -> RoundResult<&Question> {
        self.questions.get(index).ok_or(ErrorKind::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
