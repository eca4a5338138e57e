use super::*;

// 座席宛てのメッセージ (サーバー -> クライアント)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // clippyの警告が出るのでBox化　#large_enum_variant
    Event(Box<Event>),
    Action { seq: u64, actions: Vec<Action> },
    Expire { seq: u64 },
    Info { seat: Seat },
}

// クライアント -> サーバー
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    Action { seq: u64, action: Action },
}
