//! Scoring of a single answer.
//!
//! Correct answers earn a tier by how much of the time limit was left when the
//! answer went in: more than half earns [`HIGH_TIER`], more than a sixth earns
//! [`MID_TIER`], anything later earns [`LOW_TIER`]. With a 30 second limit
//! that is the familiar `> 15` / `> 5` split.

pub const HIGH_TIER: u32 = 150;
pub const MID_TIER: u32 = 100;
pub const LOW_TIER: u32 = 50;

/// Outcome of one answer, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub points: u32,
    /// Index of the correct option.
    pub answer: usize,
}

pub fn score(selected: Option<usize>, correct: usize, remaining: u32, limit: u32) -> u32 {
    match selected {
        Some(idx) if idx == correct => {
            let (remaining, limit) = (u64::from(remaining), u64::from(limit));
            if remaining * 2 > limit {
                HIGH_TIER
            } else if remaining * 6 > limit {
                MID_TIER
            } else {
                LOW_TIER
            }
        }
        _ => 0,
    }
}

pub fn judge(selected: Option<usize>, correct: usize, remaining: u32, limit: u32) -> Verdict {
    Verdict {
        correct: selected == Some(correct),
        points: score(selected, correct, remaining, limit),
        answer: correct,
    }
}
