use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    // Controller側から提供されるDiscard(打牌)の配列は打牌可能な牌の一覧
    // Discard以外は提供されたActionの配列から厳密に同じものを返却
    Nop, // Turn: ツモ切り, Call: 鳴き,ロンのスキップ (Pass)

    // Turn Actions
    Discard, // 打牌
    Ankan,   // 暗槓 (自摸番での槓宣言)
    Tsumo,   // ツモ和了

    // Call Actions (配列は鳴きにより手牌から消失する牌のリスト)
    Chi,    // チー   (CallSequence)
    Pon,    // ポン   (CallTriplet)
    Minkan, // 明槓   (CallQuad)
    Ron,    // ロン   (CallWin)
}

impl ActionType {
    // 鳴き・ロンの優先度 (大きい方が優先)
    #[inline]
    pub fn call_priority(&self) -> usize {
        match self {
            ActionType::Ron => 3,
            ActionType::Pon | ActionType::Minkan => 2,
            ActionType::Chi => 1,
            _ => 0,
        }
    }
}

// Vec<Tile>は操作により手牌からなくなる牌
// Chi, Ponなどの標的の牌は打牌された牌を参照する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub ty: ActionType,
    pub tiles: Vec<Tile>,
}

impl Action {
    #[inline]
    pub fn new(ty: ActionType, tiles: Vec<Tile>) -> Self {
        Self { ty, tiles }
    }

    #[inline]
    pub fn nop() -> Self {
        Self::new(ActionType::Nop, vec![])
    }

    #[inline]
    pub fn discard(t: Tile) -> Self {
        Self::new(ActionType::Discard, vec![t])
    }

    #[inline]
    pub fn ankan(t: Tile) -> Self {
        Self::new(ActionType::Ankan, vec![t; 4])
    }

    #[inline]
    pub fn tsumo() -> Self {
        Self::new(ActionType::Tsumo, vec![])
    }

    // 手牌から出す2枚 (順不同)
    #[inline]
    pub fn chi(t0: Tile, t1: Tile) -> Self {
        let mut v = vec![t0, t1];
        v.sort();
        Self::new(ActionType::Chi, v)
    }

    #[inline]
    pub fn pon(t: Tile) -> Self {
        Self::new(ActionType::Pon, vec![t; 2])
    }

    #[inline]
    pub fn minkan(t: Tile) -> Self {
        Self::new(ActionType::Minkan, vec![t; 3])
    }

    #[inline]
    pub fn ron() -> Self {
        Self::new(ActionType::Ron, vec![])
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.ty, self.tiles)
    }
}

// 打牌に対する各プレイヤーの応答
// seqは割り込み受付のラウンド内通し番号で,古い応答の検出に使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptResponse {
    pub seq: u64,
    pub seat: Seat,
    pub action: Action,
}

impl InterruptResponse {
    #[inline]
    pub fn new(seq: u64, seat: Seat, action: Action) -> Self {
        Self { seq, seat, action }
    }

    #[inline]
    pub fn pass(seq: u64, seat: Seat) -> Self {
        Self::new(seq, seat, Action::nop())
    }
}
