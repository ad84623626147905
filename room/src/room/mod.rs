mod request;

use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, UnboundedReceiver};
use tracing::{debug, error, info, warn};

use round::{ClockTick, Controller, Phase, QuestionBank, RoundEvent};

use crate::consts::*;
use crate::error::{ErrorKind, RoomResult};
use crate::roster::Roster;
use crate::session::Session;
use crate::types::*;
pub use request::Request as RoomReq;

use protocol::{PlayerRequest as PlayerReq, PlayerResponse as PlayerResp};

/// One quiz room: a single connection playing its own round. The room task is
/// the only owner of the controller, so requests and clock ticks are applied
/// one at a time.
pub struct Room {
    game: String,
    controller: Controller,
    roster: Arc<dyn Roster>,
    session: Session,

    rm_rx: Receiver<RoomReq>,
    ticks: Receiver<ClockTick>,
    events: UnboundedReceiver<RoundEvent>,
}

impl Room {
    pub fn new(game: String, ws_stream: WsStream, bank: Arc<QuestionBank>, roster: Arc<dyn Roster>) -> Self {
        let (loopback, rm_rx) = mpsc::channel::<RoomReq>(ROOM_INBOX);
        let (events_tx, events) = mpsc::unbounded_channel();
        let (controller, ticks) = Controller::new(bank, events_tx);
        let session = Session::new(ws_stream, loopback);

        Self {
            game,
            controller,
            roster,
            session,

            rm_rx,
            ticks,
            events,
        }
    }

    pub async fn run(mut self) -> RoomResult<()> {
        info!(game = %self.game, "room opened");
        let result = self.serve().await;
        match result {
            Ok(()) => info!(game = %self.game, score = self.controller.state().total_score, "room closed"),
            Err(ref e) => error!(game = %self.game, "room torn down: {}", e),
        }
        self.session.close().await;
        result
    }

    async fn serve(&mut self) -> RoomResult<()> {
        loop {
            tokio::select! {
                req = self.rm_rx.recv() => match req {
                    Some(req) => self.handle(req).await?,
                    None => self.controller.leave(),
                },
                Some(tick) = self.ticks.recv() => self.controller.on_tick(tick)?,
            }
            self.flush().await?;
            if self.controller.phase() == Phase::Left {
                return Ok(());
            }
        }
    }

    async fn handle(&mut self, req: RoomReq) -> RoomResult<()> {
        match req {
            RoomReq::Player(PlayerReq::Begin) => {
                match self.roster.participants(&self.game).await {
                    Ok(found) => {
                        let res = self.controller.begin(found);
                        self.recover(res).await
                    }
                    Err(e) => {
                        warn!(game = %self.game, "roster unavailable: {}", e);
                        self.notice("Could not check who is in this game, try again.".to_string()).await;
                        Ok(())
                    }
                }
            }
            RoomReq::Player(PlayerReq::Select(idx)) => {
                let res = self.controller.select_option(idx as usize);
                self.recover(res).await
            }
            RoomReq::Player(PlayerReq::Submit) => {
                let res = self.controller.submit();
                self.recover(res).await
            }
            RoomReq::Player(PlayerReq::Leave) | RoomReq::Logout => {
                self.controller.leave();
                Ok(())
            }
        }
    }

    /// Player mistakes become a notice; anything else ends the room.
    async fn recover(&self, res: round::RoundResult<()>) -> RoomResult<()> {
        match res {
            Ok(()) => Ok(()),
            Err(e) => match notice_for(&e) {
                Some(msg) => {
                    debug!(game = %self.game, "refused: {}", e);
                    self.notice(msg).await;
                    Ok(())
                }
                None => Err(ErrorKind::Round(e)),
            },
        }
    }

    async fn flush(&mut self) -> RoomResult<()> {
        while let Ok(event) = self.events.try_recv() {
            let resp = respond(self.controller.bank(), event)?;
            self.session.send(resp).await;
        }
        Ok(())
    }

    async fn notice(&self, msg: String) {
        self.session.send(PlayerResp::Notice { msg }).await
    }
}

fn notice_for(err: &round::ErrorKind) -> Option<String> {
    use round::ErrorKind::*;
    match err {
        NoSelection => Some("Pick an answer before submitting.".to_string()),
        InsufficientPlayers { required, .. } => Some(format!("Need at least {} players to start.", required)),
        InvalidPhase(_) | InvalidOption { .. } => Some(err.to_string()),
        OutOfRange { .. } | InvalidLimit => None,
    }
}

fn respond(bank: &QuestionBank, event: RoundEvent) -> RoomResult<PlayerResp> {
    let resp = match event {
        RoundEvent::PhaseChanged(phase) => PlayerResp::Phase(phase),
        RoundEvent::Question(index) => {
            let question = bank.question_at(index)?;
            // banks are capped at u16::MAX questions on load
            PlayerResp::Question {
                index: index as u16,
                count: bank.len() as u16,
                prompt: question.prompt.clone(),
                options: question.options.clone(),
                time_limit: question.time_limit,
            }
        }
        RoundEvent::Tick(rest) => PlayerResp::CountDown(rest),
        RoundEvent::Answered(verdict) => PlayerResp::Verdict {
            correct: verdict.correct,
            points: verdict.points,
            answer: verdict.answer as u8,
        },
        RoundEvent::Finished(total) => PlayerResp::GameEnd { total },
    };
    Ok(resp)
}
