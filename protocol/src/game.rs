use serde::{Serialize, Deserialize};

/// A game record as served by the game-record store. Only the roster is
/// read here; the remaining fields are kept so records round-trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub players: Vec<Participant>,
    #[serde(default)]
    pub max_players: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub ready: bool,
}

impl GameRecord {
    pub fn participant_count(&self) -> usize {
        self.players.len()
    }
}
