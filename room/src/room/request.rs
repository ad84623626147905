#[derive(Debug)]
pub enum Request {
    Player(protocol::PlayerRequest),
    /// The connection is gone.
    Logout,
}
