use serde::{Serialize, Deserialize};
use crate::{BinCodeMessage, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerResponse {
    Notice {
        msg: String
    },
    Phase(Phase),
    Question {
        index: u16,
        count: u16,
        prompt: String,
        options: Vec<String>,
        time_limit: u32,
    },
    CountDown(u32),
    Verdict {
        correct: bool,
        points: u32,
        answer: u8,
    },
    GameEnd {
        total: u32
    },
}

impl BinCodeMessage<'_> for PlayerResponse {}
