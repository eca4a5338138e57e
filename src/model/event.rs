use super::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    New(EventNew),         // 局開始
    Deal(EventDeal),       // ツモ
    Flower(EventFlower),   // 花牌抜き
    Discard(EventDiscard), // 打牌
    Meld(EventMeld),       // 鳴き・暗槓
    Win(EventWin),         // 局終了 (和了)
    Draw(EventDraw),       // 局終了 (流局)
}

impl Event {
    #[inline]
    pub fn new(
        round: usize,
        prevailing_wind: Tnum,
        dealer: Seat,
        hands: [Vec<Tile>; SEAT],
        wall_count: usize,
    ) -> Self {
        Self::New(EventNew {
            round,
            prevailing_wind,
            dealer,
            hands,
            wall_count,
        })
    }

    #[inline]
    pub fn deal(seat: Seat, tile: Tile, is_replacement: bool) -> Self {
        Self::Deal(EventDeal {
            seat,
            tile,
            is_replacement,
        })
    }

    #[inline]
    pub fn flower(seat: Seat, tile: Tile) -> Self {
        Self::Flower(EventFlower { seat, tile })
    }

    #[inline]
    pub fn discard(seat: Seat, tile: Tile, is_drawn: bool) -> Self {
        Self::Discard(EventDiscard {
            seat,
            tile,
            is_drawn,
        })
    }

    #[inline]
    pub fn meld(seat: Seat, meld_type: MeldType, tiles: Vec<Tile>, from: Option<Seat>) -> Self {
        Self::Meld(EventMeld {
            seat,
            meld_type,
            tiles,
            from,
        })
    }

    #[inline]
    pub fn win(context: WinContext, scores: [Point; SEAT]) -> Self {
        Self::Win(EventWin { context, scores })
    }

    #[inline]
    pub fn draw(hands: [Vec<Tile>; SEAT]) -> Self {
        Self::Draw(EventDraw { hands })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNew {
    pub round: usize,             // 局の通し番号
    pub prevailing_wind: Tnum,    // 場風
    pub dealer: Seat,             // 親の座席
    pub hands: [Vec<Tile>; SEAT], // 各プレイヤーの配牌(13枚)
    pub wall_count: usize,        // 牌山残り枚数
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeal {
    pub seat: Seat,
    pub tile: Tile,           // ツモ牌
    pub is_replacement: bool, // 末尾から引いた補充牌 (花牌・槓の後)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFlower {
    pub seat: Seat,
    pub tile: Tile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDiscard {
    pub seat: Seat,
    pub tile: Tile,
    pub is_drawn: bool, // ツモ切り
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeld {
    pub seat: Seat,
    pub meld_type: MeldType, // 鳴き種別
    pub tiles: Vec<Tile>,    // 面子を構成するすべての牌
    pub from: Option<Seat>,  // 鳴いた相手 (暗槓はNone)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWin {
    pub context: WinContext,
    pub scores: [Point; SEAT], // 和了後の累計得点
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraw {
    pub hands: [Vec<Tile>; SEAT], // 流局時の各プレイヤーの手牌
}
