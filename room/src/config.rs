use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use round::{QuestionBank, MIN_PARTICIPANTS};

use crate::consts::*;
use crate::error::RoomResult;
use crate::roster::{FixedRoster, RemoteRoster, Roster};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// JSON array of questions played in every room
    #[clap(short, long, parse(from_os_str), default_value = DEFAULT_QUESTIONS)]
    pub questions: PathBuf,
    /// Head count reported for every game when no roster URL is given
    #[clap(long, default_value_t = MIN_PARTICIPANTS)]
    pub participants: usize,
    /// Game-record endpoint; `{url}/{game}` is fetched before a round begins
    #[clap(long)]
    pub roster_url: Option<String>,
}

pub struct Config {
    pub port: u16,
    pub bank: Arc<QuestionBank>,
    pub roster: Arc<dyn Roster>,
}

impl Args {
    fn roster(&self) -> RoomResult<Arc<dyn Roster>> {
        let roster: Arc<dyn Roster> = match self.roster_url {
            Some(ref url) => Arc::new(RemoteRoster::new(url.clone())?),
            None => Arc::new(FixedRoster(self.participants)),
        };
        Ok(roster)
    }
}

impl Config {
    pub fn from_args(args: Args) -> RoomResult<Self> {
        let bank = QuestionBank::load(&args.questions)?;
        Ok(Self {
            port: args.port,
            bank: Arc::new(bank),
            roster: args.roster()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["room"]).unwrap();
        assert_eq!(args.port, DEFAULT_PORT);
        assert_eq!(args.questions, PathBuf::from(DEFAULT_QUESTIONS));
        assert_eq!(args.participants, MIN_PARTICIPANTS);
        assert!(args.roster_url.is_none());
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from([
            "room", "-p", "9100", "-q", "bank.json", "--participants", "5",
            "--roster-url", "http://store/games",
        ])
        .unwrap();
        assert_eq!(args.port, 9100);
        assert_eq!(args.questions, PathBuf::from("bank.json"));
        assert_eq!(args.participants, 5);
        assert_eq!(args.roster_url.as_deref(), Some("http://store/games"));
    }

    #[tokio::test]
    async fn fixed_roster_unless_a_url_is_given() {
        let args = Args::try_parse_from(["room", "--participants", "4"]).unwrap();
        assert_eq!(args.roster().unwrap().participants("1").await.unwrap(), 4);
    }

    #[test]
    fn missing_bank_fails_startup() {
        let args = Args::try_parse_from(["room", "-q", "/nonexistent/bank.json"]).unwrap();
        assert!(matches!(Config::from_args(args), Err(ErrorKind::Bank(_))));
    }

    #[test]
    fn shipped_bank_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/questions.json");
        let args = Args::try_parse_from(["room", "-q", path]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.bank.len(), 4);
    }
}
