pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_QUESTIONS: &str = "questions.json";

pub const HB_DURATION: tokio::time::Duration = tokio::time::Duration::from_secs(10);

pub const ROOM_INBOX: usize = 32;
pub const SESSION_OUTBOX: usize = 128;

pub const ROSTER_TIMEOUT: tokio::time::Duration = tokio::time::Duration::from_secs(5);
