use std::collections::VecDeque;

use super::*;

// 卓の進行状態
// 次にアクションを行うべき座席はこのフィールドのみを正とする
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingDraw(Seat),      // ツモ待ち
    AwaitingDiscard(Seat),   // 打牌待ち (ツモ後または鳴き後)
    Interrupt(Seat, Tile),   // 打牌に対する鳴き・ロンの受付中 (打牌者, 打牌)
    Ended(RoundEnd),         // 局終了
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    Win(Seat), // 和了
    Exhausted, // 流局 (牌山切れ)
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::AwaitingDraw(s) => write!(f, "AwaitingDraw({})", s),
            Phase::AwaitingDiscard(s) => write!(f, "AwaitingDiscard({})", s),
            Phase::Interrupt(s, t) => write!(f, "Interrupt({}, {})", s, t),
            Phase::Ended(RoundEnd::Win(s)) => write!(f, "Ended(Win({}))", s),
            Phase::Ended(RoundEnd::Exhausted) => write!(f, "Ended(Exhausted)"),
        }
    }
}

// 局単位の卓情報
// 局の開始時にRoundManagerが生成し,局の終了とともに破棄する
#[derive(Debug, Default, Clone, Serialize)]
pub struct Stage {
    pub round: usize,             // 局の通し番号 (0~)
    pub prevailing_wind: Tnum,    // 場風 (WE | WS | WW | WN)
    pub dealer: Seat,             // 親(東家)の座席
    pub retention: usize,         // 親が場風の席で連続して和了した回数
    pub step: usize,              // 状態遷移毎に+1する
    pub wall: VecDeque<Tile>,     // 牌山 先頭からツモ,末尾から槓の補充
    pub players: [Player; SEAT],  // 各プレイヤー情報
    pub phase: Phase,             // 進行状態
    pub last_discard: Option<(Seat, Tile)>, // 直前の打牌
}

impl Stage {
    // 卓上の位置 (東家:0, 南家:1, 西家:2, 北家:3)
    #[inline]
    pub fn get_position(&self, seat: Seat) -> Index {
        (seat + SEAT - self.dealer) % SEAT
    }

    #[inline]
    pub fn get_seat_wind(&self, seat: Seat) -> Tnum {
        self.get_position(seat) + 1 // WE | WS | WW | WN
    }

    // 花牌の番号は自風と同じ
    #[inline]
    pub fn get_flower_number(&self, seat: Seat) -> Tnum {
        self.get_seat_wind(seat)
    }

    #[inline]
    pub fn wall_count(&self) -> usize {
        self.wall.len()
    }

    pub fn get_scores(&self) -> [Point; SEAT] {
        let mut scores = [0; SEAT];
        for s in 0..SEAT {
            scores[s] = self.players[s].score;
        }
        scores
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round: {}, prevailing_wind: {}, dealer: {}, retention: {}",
            self.round, self.prevailing_wind, self.dealer, self.retention,
        )?;
        writeln!(
            f,
            "phase: {}, wall_count: {}, last_discard: {:?}",
            self.phase,
            self.wall.len(),
            self.last_discard,
        )?;

        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", boader)?;
        }
        Ok(())
    }
}
