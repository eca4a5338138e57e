use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Default, Clone, Serialize)]
pub struct Player {
    pub seat: Seat,             // 座席番号(ゲーム終了まで不変)
    pub score: Point,           // 和了による累計得点
    pub hand: TileTable,        // 手牌(ツモ牌は含まない)
    pub drawn: Option<Tile>,    // ツモ牌 打牌まで手牌とは別に保持
    pub flowers: Vec<Tile>,     // 抜いた花牌 (点数計算のボーナスのみ)
    pub melds: Vec<Meld>,       // 鳴き・暗槓の一覧
    pub discards: Vec<Discard>, // 捨て牌一覧 (鳴かれた牌は取り除かれる)
}

impl Player {
    // 手牌とツモ牌を合わせた枚数
    pub fn count_tile(&self, t: Tile) -> usize {
        let d = if self.drawn == Some(t) { 1 } else { 0 };
        self.hand[t.0][t.1] + d
    }

    // ツモ牌を手牌に合流
    pub fn merge_drawn(&mut self) {
        if let Some(t) = self.drawn.take() {
            self.hand[t.0][t.1] += 1;
        }
    }

    pub fn hand_tiles(&self) -> Vec<Tile> {
        let mut v = vec![];
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                for _ in 0..self.hand[ti][ni] {
                    v.push(Tile(ti, ni));
                }
            }
        }
        v
    }

    // 手牌 + ツモ牌 + 鳴きの総枚数 (ツモ後は 14 + 槓の数)
    pub fn count_total(&self) -> usize {
        let h: usize = self.hand.iter().map(|r| r.iter().sum::<usize>()).sum();
        let d = if self.drawn.is_some() { 1 } else { 0 };
        let m: usize = self.melds.iter().map(|m| m.tiles.len()).sum();
        h + d + m
    }

    pub fn count_self_quads(&self) -> usize {
        self.melds
            .iter()
            .filter(|m| m.meld_type == MeldType::Ankan)
            .count()
    }

    pub fn count_claimed_melds(&self) -> usize {
        self.melds.iter().filter(|m| m.from.is_some()).count()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let drawn = if let Some(d) = self.drawn {
            d.to_string()
        } else {
            "None".to_string()
        };
        writeln!(
            f,
            "seat: {}, score: {}, drawn: {}, flowers: {}",
            self.seat,
            self.score,
            drawn,
            vec_to_string(&self.flowers),
        )?;
        writeln!(f, "hand: {}", vec_to_string(&self.hand_tiles()))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Discard {
    pub step: usize,
    pub tile: Tile,
    pub is_drawn: bool, // ツモ切りフラグ
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,    // 順子
    Pon,    // 刻子
    Minkan, // 明槓
    Ankan,  // 暗槓
}

#[derive(Debug, Clone, Serialize)]
pub struct Meld {
    pub step: usize,
    pub seat: Seat,
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,           // 鳴いた牌を含むすべての牌 (昇順)
    pub from: Option<(Seat, Tile)>, // 鳴いた相手と牌 暗槓の場合はNone
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", s.join("|"))?;
        if let Some((s, _)) = self.from {
            write!(f, "({})", s)?;
        }
        Ok(())
    }
}
