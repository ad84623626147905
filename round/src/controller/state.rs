use protocol::Phase;

/// Everything a round tracks between transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub phase: Phase,
    pub current_question: usize,
    pub seconds_remaining: u32,
    pub selected_option: Option<usize>,
    pub total_score: u32,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            current_question: 0,
            seconds_remaining: 0,
            selected_option: None,
            total_score: 0,
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}
