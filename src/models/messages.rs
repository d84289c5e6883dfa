use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::SessionId;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JoinMessage {
    pub session: SessionId,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CodeChangeMessage {
    pub payload: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PongMessage {
    pub date: String,
}

/// Frames accepted from a client
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ReceivedMessage {
    #[serde(rename = "join")]
    Join(JoinMessage),
    #[serde(rename = "leave")]
    Leave,
    #[serde(rename = "code-change")]
    CodeChange(CodeChangeMessage),
    #[serde(rename = "ping")]
    Ping,
}

/// Frames sent to a client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum SendMessage {
    #[serde(rename = "receive-code")]
    ReceiveCode { payload: Value },
    #[serde(rename = "joined")]
    Joined { session: SessionId },
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "pong")]
    Pong(PongMessage),
}
