//! Who is registered for a game. The room only needs the head count, to
//! decide whether a round may begin.

use std::time::Duration;

use async_trait::async_trait;
use protocol::GameRecord;
use tracing::debug;

use crate::consts::ROSTER_TIMEOUT;
use crate::error::RoomResult;

#[async_trait]
pub trait Roster: Send + Sync {
    async fn participants(&self, game: &str) -> RoomResult<usize>;
}

/// Same head count for every game.
pub struct FixedRoster(pub usize);

#[async_trait]
impl Roster for FixedRoster {
    async fn participants(&self, _game: &str) -> RoomResult<usize> {
        Ok(self.0)
    }
}

/// Reads the game record from the game-record store over HTTP. A store that
/// stalls past the client timeout counts as unavailable.
pub struct RemoteRoster {
    base: String,
    client: reqwest::Client,
}

impl RemoteRoster {
    pub fn new(base: impl Into<String>) -> RoomResult<Self> {
        Self::with_timeout(base, ROSTER_TIMEOUT)
    }

    pub fn with_timeout(base: impl Into<String>, timeout: Duration) -> RoomResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base: base.into(), client })
    }

    fn url(&self, game: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), game)
    }
}

#[async_trait]
impl Roster for RemoteRoster {
    async fn participants(&self, game: &str) -> RoomResult<usize> {
        let url = self.url(game);
        debug!(%url, "roster lookup");
        let body = self.client.get(url).send().await?.error_for_status()?.text().await?;
        count_participants(&body)
    }
}

fn count_participants(body: &str) -> RoomResult<usize> {
    let record: GameRecord = serde_json::from_str(body)?;
    Ok(record.participant_count())
}
