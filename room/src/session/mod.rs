use crate::consts::*;
use crate::types::*;
use crate::room::RoomReq;
use protocol::PlayerResponse;
use tokio::sync::{mpsc};
use tokio::task::JoinHandle;
use tokio::time;
use futures::{StreamExt, SinkExt};
use tracing::{debug, warn};

use protocol::{BinCodeMessage, PlayerRequest};

/// The websocket end of a room: one task reads frames into the room's inbox,
/// one writes the room's responses out, one keeps the connection alive.
#[derive(Debug)]
pub struct Session {
    pub(crate) ws_from_room_tx: mpsc::Sender<WsMsg>,

    pub(crate) _tx_handle: JoinHandle<()>,
    pub(crate) _rx_handle: JoinHandle<()>,
    pub(crate) _ping_handle: JoinHandle<()>,
}

impl Session {

    pub(crate) fn new(stream: WsStream, room_tx: mpsc::Sender<RoomReq>) -> Self {

        let (mut ws_tx, mut ws_rx) = stream.split();
        let (ws_from_room_tx, mut ws_from_room_rx) = mpsc::channel::<WsMsg>(SESSION_OUTBOX);

        let tx_ping = ws_from_room_tx.clone();
        let _ping_handle = tokio::spawn(async move {
            loop {
                if tx_ping.send(WsMsg::Ping(Vec::new())).await.is_err() {
                    break;
                }
                time::sleep(HB_DURATION).await;
            }
        });

        let room_transmit_tx = room_tx.clone();
        let _rx_handle = tokio::spawn(
            async move {
                while let Some(Ok(ws_msg)) = ws_rx.next().await {
                    match ws_msg {
                        WsMsg::Binary(bin) => {
                            match PlayerRequest::deser(&bin) {
                                Ok(req) => {
                                    room_transmit_tx.send(RoomReq::Player(req)).await.unwrap_or_default();
                                }
                                Err(e) => warn!("undecodable frame: {}", e),
                            }
                        },
                        WsMsg::Close(_) => break,
                        _ => {},
                    }
                }
                debug!("session stream ended");
                room_transmit_tx.send(RoomReq::Logout).await.unwrap_or_default();
            }
        );

        let logout_reminder = room_tx;
        let _tx_handle = tokio::spawn(
            async move {
                use tokio_tungstenite::tungstenite::error::Error::{AlreadyClosed, ConnectionClosed};
                while let Some(ws_msg) = ws_from_room_rx.recv().await {
                    match ws_tx.send(ws_msg).await {
                        Err(AlreadyClosed) | Err(ConnectionClosed) => {
                            logout_reminder.send(RoomReq::Logout).await.unwrap_or_default();
                            break;
                        }
                        _ => {},
                    };
                }
            }
        );

        Self {
            ws_from_room_tx,

            _tx_handle,
            _rx_handle,
            _ping_handle
        }
    }

    pub(crate) async fn send(&self, resp: PlayerResponse) {
        if let Ok(msg) = resp.ser() {
            self.ws_from_room_tx.send(msg).await.unwrap_or_default()
        }
    }

    /// Stops reading and pinging, then lets the writer flush what is queued
    /// followed by a close frame.
    pub(crate) async fn close(self) {
        self._rx_handle.abort();
        self._ping_handle.abort();
        self.ws_from_room_tx.send(WsMsg::Close(None)).await.unwrap_or_default();
    }
}
