mod state;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::bank::{Question, QuestionBank};
use crate::clock::{ClockEvent, ClockTick, RoundClock};
use crate::error::{ErrorKind, RoundResult};
use crate::judge::{judge, Verdict};
use crate::MIN_PARTICIPANTS;
use protocol::Phase;

pub use state::RoundState;

/// Notifications for whoever renders the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    PhaseChanged(Phase),
    /// A question became active.
    Question(usize),
    Tick(u32),
    Answered(Verdict),
    Finished(u32),
}

/// Drives one room's round. Every transition takes `&mut self`, so the owner
/// serializes them; clock ticks come back in through [`Controller::on_tick`].
#[derive(Debug)]
pub struct Controller {
    bank: Arc<QuestionBank>,
    clock: RoundClock,
    state: RoundState,
    events: mpsc::UnboundedSender<RoundEvent>,
}

impl Controller {
    pub fn new(
        bank: Arc<QuestionBank>,
        events: mpsc::UnboundedSender<RoundEvent>,
    ) -> (Self, mpsc::Receiver<ClockTick>) {
        let (clock, ticks) = RoundClock::new();
        let controller = Self {
            bank,
            clock,
            state: RoundState::new(),
            events,
        };
        (controller, ticks)
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn current_question(&self) -> RoundResult<&Question> {
        self.bank.question_at(self.state.current_question)
    }

    pub fn begin(&mut self, participants: usize) -> RoundResult<()> {
        self.expect_phase(Phase::Waiting)?;
        if participants < MIN_PARTICIPANTS {
            return Err(ErrorKind::InsufficientPlayers {
                found: participants,
                required: MIN_PARTICIPANTS,
            });
        }
        let limit = self.bank.question_at(0)?.time_limit;
        self.clock.start(limit)?;
        self.state.current_question = 0;
        self.state.seconds_remaining = limit;
        self.state.selected_option = None;
        self.set_phase(Phase::Playing);
        self.notify(RoundEvent::Question(0));
        Ok(())
    }

    /// Records the player's pick; a later pick replaces it.
    pub fn select_option(&mut self, index: usize) -> RoundResult<()> {
        self.expect_phase(Phase::Playing)?;
        let count = self.current_question()?.options.len();
        if index >= count {
            return Err(ErrorKind::InvalidOption { index, count });
        }
        self.state.selected_option = Some(index);
        Ok(())
    }

    pub fn submit(&mut self) -> RoundResult<()> {
        self.expect_phase(Phase::Playing)?;
        if self.state.selected_option.is_none() {
            return Err(ErrorKind::NoSelection);
        }
        self.settle()
    }

    pub fn leave(&mut self) {
        if self.state.phase == Phase::Left {
            return;
        }
        self.clock.stop();
        self.set_phase(Phase::Left);
    }

    pub fn on_tick(&mut self, tick: ClockTick) -> RoundResult<()> {
        if self.state.phase != Phase::Playing {
            return Ok(());
        }
        match self.clock.on_tick(tick) {
            None => Ok(()),
            Some(ClockEvent::Tick(remaining)) => {
                self.state.seconds_remaining = remaining;
                self.notify(RoundEvent::Tick(remaining));
                Ok(())
            }
            Some(ClockEvent::Expired) => {
                self.state.seconds_remaining = 0;
                self.notify(RoundEvent::Tick(0));
                debug!(question = self.state.current_question, "time is up");
                self.settle()
            }
        }
    }

    /// Scores the current answer, then moves on or finishes. A missing
    /// selection scores zero here; `submit` has already refused it.
    fn settle(&mut self) -> RoundResult<()> {
        let index = self.state.current_question;
        let (correct, limit) = {
            let question = self.bank.question_at(index)?;
            (question.correct_option, question.time_limit)
        };
        let verdict = judge(self.state.selected_option, correct, self.state.seconds_remaining, limit);
        self.state.total_score += verdict.points;
        self.notify(RoundEvent::Answered(verdict));

        let next = index + 1;
        if next >= self.bank.len() {
            self.clock.stop();
            self.set_phase(Phase::Finished);
            self.notify(RoundEvent::Finished(self.state.total_score));
            return Ok(());
        }

        let limit = self.bank.question_at(next)?.time_limit;
        self.clock.start(limit)?;
        self.state.current_question = next;
        self.state.selected_option = None;
        self.state.seconds_remaining = limit;
        self.notify(RoundEvent::Question(next));
        Ok(())
    }

    fn expect_phase(&self, phase: Phase) -> RoundResult<()> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(ErrorKind::InvalidPhase(self.state.phase))
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = ?self.state.phase, to = ?phase, "round phase");
        self.state.phase = phase;
        self.notify(RoundEvent::PhaseChanged(phase));
    }

    fn notify(&self, event: RoundEvent) {
        self.events.send(event).unwrap_or_default();
    }
}
