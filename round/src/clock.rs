//! Per-question countdown.
//!
//! The clock itself is plain state. A spawned ticker task posts one
//! [`ClockTick`] per second into the owner's channel and the owner feeds them
//! back through [`RoundClock::on_tick`]. Each `start` opens a new epoch, so a
//! tick left over from a cancelled countdown is recognised and dropped.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant};

use crate::error::{ErrorKind, RoundResult};

pub const TICK: Duration = Duration::from_secs(1);
const TICK_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick(u32),
    Expired,
}

#[derive(Debug)]
pub struct RoundClock {
    remaining: u32,
    epoch: u64,
    running: bool,
    stopper: Option<oneshot::Sender<()>>,
    loopback: mpsc::Sender<ClockTick>,
}

impl RoundClock {
    pub fn new() -> (Self, mpsc::Receiver<ClockTick>) {
        let (loopback, ticks) = mpsc::channel(TICK_BUFFER);
        let clock = Self {
            remaining: 0,
            epoch: 0,
            running: false,
            stopper: None,
            loopback,
        };
        (clock, ticks)
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, limit: u32) -> RoundResult<()> {
        if limit == 0 {
            return Err(ErrorKind::InvalidLimit);
        }
        self.stop();
        self.epoch += 1;
        self.remaining = limit;
        self.running = true;
        self.stopper = Some(spawn_ticker(limit, self.epoch, self.loopback.clone()));
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(stopper) = self.stopper.take() {
            let _ = stopper.send(());
        }
        self.running = false;
    }

    pub fn on_tick(&mut self, tick: ClockTick) -> Option<ClockEvent> {
        if !self.running || tick.epoch != self.epoch || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.stop();
            Some(ClockEvent::Expired)
        } else {
            Some(ClockEvent::Tick(self.remaining))
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

fn spawn_ticker(secs: u32, epoch: u64, loopback: mpsc::Sender<ClockTick>) -> oneshot::Sender<()> {
    let (tx, mut rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + TICK, TICK);
        for _ in 0..secs {
            tokio::select! {
                _ = &mut rx => return,
                _ = interval.tick() => {}
            }
            if loopback.send(ClockTick { epoch }).await.is_err() {
                return;
            }
        }
    });
    tx
}
