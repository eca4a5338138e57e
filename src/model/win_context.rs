use super::*;

// 和了形の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinShape {
    Standard,         // 4面子1雀頭
    SevenPairs,       // 七対子
    ThirteenDistinct, // 国士無双
}

// 点数計算の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreContext {
    pub points: Point,                   // 合計点
    pub breakdown: Vec<(String, Point)>, // 加点・減点の内訳 Vec<(name, point)>
}

impl fmt::Display for ScoreContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self
            .breakdown
            .iter()
            .map(|(name, p)| format!("{}({:+})", name, p))
            .collect();
        write!(f, "{}pt [{}]", self.points, items.join(", "))
    }
}

// 和了の詳細 (和了演出やログ出力に必要な情報)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinContext {
    pub seat: Seat,
    pub from: Option<Seat>,  // ロンの場合は打牌者
    pub hand: Vec<Tile>,     // 和了手牌(鳴きは含まない, 和了牌を含む)
    pub winning_tile: Tile,  // 和了牌
    pub shape: WinShape,     // 和了形
    pub score: ScoreContext, // 点数
}
