use serde::{Deserialize, Serialize};
use crate::BinCodeMessage;

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub enum PlayerRequest {
    Begin,
    Select(u8),
    Submit,
    Leave,
}

impl BinCodeMessage<'_> for PlayerRequest {}
