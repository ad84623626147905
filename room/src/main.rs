

mod logger;
mod error;
mod types;
mod consts;
mod config;
mod roster;
mod room;

mod session;

// # Tasks
// 1. room: owns the round controller and applies requests and ticks in order
// 2. session: websocket reader, writer and heartbeat
// 3. clock: one ticker per active question
use tokio::net::{TcpListener};
use tracing::{error, info, warn};
use clap::Parser;

use config::{Args, Config};
use error::{ErrorKind, RoomResult};

#[tokio::main]
async fn main() {
    logger::init();
    let args = Args::parse();
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("startup failed: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = run(config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}


async fn run(config: Config) -> RoomResult<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await
        .map_err(|source| ErrorKind::Bind { addr: addr.clone(), source })?;
    info!(%addr, questions = config.bank.len(), "listening");

    while let Ok((stream, peer)) = listener.accept().await {
        let bank = config.bank.clone();
        let roster = config.roster.clone();
        tokio::spawn(async move {
            let (login_res_tx, login_res_rx) = tokio::sync::oneshot::channel::<LoginType>();
            let ws_stream = match tokio_tungstenite::accept_hdr_async(stream, Callback{
                login_result: login_res_tx,
            })
            .await {
                Ok(ws_stream) => ws_stream,
                Err(e) => {
                    warn!(%peer, "handshake failed: {}", e);
                    return;
                }
            };

            if let Ok(LoginType::Room(game)) = login_res_rx.await {
                info!(%peer, %game, "joined");
                room::Room::new(game, ws_stream, bank, roster).run().await.unwrap_or_default();
            }
        });
    }

    Ok(())
}

use tokio_tungstenite::tungstenite::handshake::server::Request as HsReq;
use tokio_tungstenite::tungstenite::handshake::server::Response as HsResp;
use tokio_tungstenite::tungstenite::handshake::server::ErrorResponse as HsError;
use tokio_tungstenite::tungstenite::handshake::server::Callback as HsCallback;
use tokio_tungstenite::tungstenite::http::StatusCode;

enum LoginType {
    Room(String),
    Reject,
}


struct Callback {
    login_result: tokio::sync::oneshot::Sender<LoginType>
}

impl HsCallback for Callback {
    fn on_request(self, req: &HsReq, resp: HsResp ) -> Result<HsResp, HsError> {
        match room_of(req.uri().path()) {
            Some(game) => {
                self.login_result.send(LoginType::Room(game)).unwrap_or_default();
                Ok(resp)
            }
            None => {
                self.login_result.send(LoginType::Reject).unwrap_or_default();
                let mut err = HsError::new(Some("PathError".to_string()));
                *err.status_mut() = StatusCode::NOT_FOUND;
                Err(err)
            }
        }
    }
}

/// `/room/{game}` where the game id is written in decimal or hex digits.
fn room_of(path: &str) -> Option<String> {
    let game = path.strip_prefix("/room/")?;
    if game.is_empty() || !game.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(game.to_string())
}
