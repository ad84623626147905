//! Quiz round core: a question bank, a one-second round clock, the answer
//! judge and the controller that drives a single room's round.

pub mod bank;
pub mod clock;
pub mod controller;
pub mod error;
pub mod judge;

pub use bank::{Question, QuestionBank};
pub use clock::{ClockEvent, ClockTick, RoundClock};
pub use controller::{Controller, RoundEvent, RoundState};
pub use error::{ErrorKind, RoundResult};
pub use judge::{score, Verdict};
pub use protocol::Phase;

/// A round needs this many registered participants before it can begin.
pub const MIN_PARTICIPANTS: usize = 2;
