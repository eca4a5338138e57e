use thiserror::Error;

use crate::model::{Action, Phase, Point, Seat, Tile};

// ゲーム進行中の不正な操作
// いずれの場合も卓の状態は変更されない
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("seat {seat} cannot act in phase {phase}")]
    OutOfTurn { seat: Seat, phase: Phase },

    #[error("tile {tile} is not in the hand of seat {seat}")]
    TileNotInHand { seat: Seat, tile: Tile },

    #[error("seat {seat} does not hold enough tiles for {action}")]
    InsufficientTiles { seat: Seat, action: Action },

    #[error("action {action} was not offered to seat {seat}")]
    NotOffered { seat: Seat, action: Action },

    #[error("hand of seat {seat} is not a winning hand")]
    NotWinning { seat: Seat },

    #[error("winning hand of seat {seat} scores {points}, a win needs a positive score")]
    NonPositiveScore { seat: Seat, points: Point },

    #[error("no interrupt window is open")]
    NoWindow,

    #[error("interrupt window {seq} is still collecting responses")]
    WindowOpen { seq: u64 },

    #[error("response sequence {got} does not match the pending request {expected:?}")]
    StaleSequence { got: u64, expected: Option<u64> },

    #[error("wall has {count} tiles, {need} are needed to deal")]
    ShortWall { count: usize, need: usize },
}

// 牌・手牌表記の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid char: '{0}'")]
    InvalidChar(char),

    #[error("tile number before tile type")]
    NumberBeforeType,

    #[error("invalid tile: {0}")]
    InvalidTile(String),

    #[error("invalid meld: {0}")]
    InvalidMeld(String),

    #[error("invalid item: {0}")]
    InvalidItem(String),
}

// ルール設定ファイルの読み込みエラー
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rule file: {0}")]
    Json(#[from] serde_json::Error),
}
