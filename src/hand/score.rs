use super::analyze::*;
use crate::model::*;

// 点数計算に必要な和了者の状況
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinConditions {
    pub seat_wind: Tnum,        // 自風
    pub prevailing_wind: Tnum,  // 場風
    pub flower_number: Tnum,    // 自分の花牌の番号
    pub flowers: Vec<Tile>,     // 抜いた花牌
    pub n_self_quads: usize,    // 暗槓の数
    pub n_claimed_melds: usize, // 鳴きの数
    pub is_self_drawn: bool,    // ツモ和了
}

impl WinConditions {
    pub fn from_stage(stg: &Stage, seat: Seat, is_self_drawn: bool) -> Self {
        let pl = &stg.players[seat];
        Self {
            seat_wind: stg.get_seat_wind(seat),
            prevailing_wind: stg.prevailing_wind,
            flower_number: stg.get_flower_number(seat),
            flowers: pl.flowers.clone(),
            n_self_quads: pl.count_self_quads(),
            n_claimed_melds: pl.count_claimed_melds(),
            is_self_drawn,
        }
    }
}

// 和了形のすべての分解を評価して最も高い点数を返却
// 和了形でない場合はNone
pub fn score_hand(res: &HandAnalysisResult, cond: &WinConditions) -> Option<ScoreContext> {
    let mut best: Option<ScoreContext> = None;
    for d in &res.decompositions {
        let sc = score(d, cond);
        if best.as_ref().map_or(true, |b| sc.points > b.points) {
            best = Some(sc);
        }
    }
    best
}

// 基本点1に加点・減点を加算
// 0点以下の和了を認めるかどうかは呼び出し側で判断する
pub fn score(d: &Decomposition, cond: &WinConditions) -> ScoreContext {
    let mut ctx = ScoreCalculator::new();
    ctx.add("Base", 1);

    let melds: Vec<&SetPair> = d.sets.iter().filter(|s| s.ty != SetPairType::Pair).collect();
    for s in &melds {
        if !s.is_triplet() {
            continue;
        }
        let Tile(ti, ni) = s.tile;
        if ti == TW && ni == cond.seat_wind {
            ctx.add("SeatWind", 1);
        }
        if ti == TW && ni == cond.prevailing_wind {
            ctx.add("PrevailingWind", 1);
        }
        if ti == TD {
            ctx.add("Dragon", 1);
        }
    }

    if d.shape == WinShape::Standard && melds.len() == 4 {
        if melds.iter().all(|s| s.is_triplet()) {
            ctx.add("AllTriplets", 2);
        } else if melds.iter().all(|s| s.ty == SetPairType::Sequence) {
            ctx.add("AllSequences", 1);
        }
    }

    let n_match = cond
        .flowers
        .iter()
        .filter(|t| t.1 == cond.flower_number)
        .count();
    let n_mismatch = cond.flowers.len() - n_match;
    if n_match == 2 && n_mismatch == 0 {
        ctx.add("Flowers", 1);
    } else if n_match == 0 && n_mismatch > 0 {
        ctx.add("Flowers", -1);
    }

    let suits = present_suits(&d.tiles);
    match suits.as_slice() {
        [_] => {
            if d.shape == WinShape::Standard {
                ctx.add("TrueSingleSuit", 4);
            } else {
                ctx.add("SingleSuit", 3);
            }
        }
        &[s0, s1] => {
            let both_numbered = s1 < TW;
            let both_honor = s0 == TW && s1 == TD;
            if !both_numbered && !both_honor {
                ctx.add("HalfSuit", 2);
            }
        }
        _ => {}
    }

    for ti in [TM, TP, TS] {
        if (1..=9).all(|ni| d.tiles[ti][ni] > 0) {
            ctx.add("FullStraight", 2);
        }
    }

    ctx.finish()
}

struct ScoreCalculator {
    points: Point,
    breakdown: Vec<(String, Point)>,
}

impl ScoreCalculator {
    fn new() -> Self {
        Self {
            points: 0,
            breakdown: vec![],
        }
    }

    fn add(&mut self, name: &str, p: Point) {
        self.points += p;
        self.breakdown.push((name.to_string(), p));
    }

    fn finish(self) -> ScoreContext {
        ScoreContext {
            points: self.points,
            breakdown: self.breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::control::common::{meld_from_string, tiles_from_string, tiles_to_tile_table};

    fn cond(seat_wind: Tnum, prevailing_wind: Tnum) -> WinConditions {
        WinConditions {
            seat_wind,
            prevailing_wind,
            flower_number: seat_wind,
            ..Default::default()
        }
    }

    fn score_str(exp: &str, melds: &[&str], cond: &WinConditions) -> ScoreContext {
        let tiles = tiles_from_string(exp).unwrap();
        let melds: Vec<Meld> = melds
            .iter()
            .map(|m| meld_from_string(m, 0, false).unwrap())
            .collect();
        let res = analyze(&tiles_to_tile_table(&tiles), None, &melds);
        score_hand(&res, cond).unwrap()
    }

    fn has(sc: &ScoreContext, name: &str, p: Point) -> bool {
        sc.breakdown.iter().any(|(n, v)| n == name && *v == p)
    }

    #[test]
    fn test_base_only() {
        // 三色, 順子と刻子の混在
        let sc = score_str("m123p456s789m555p99", &[], &cond(WS, WE));
        assert_eq!(sc.points, 1);
        assert_eq!(sc.breakdown, vec![("Base".to_string(), 1)]);
    }

    #[test]
    fn test_single_suit_all_triplets() {
        let sc = score_str("m11122233355599", &[], &cond(WE, WE));
        assert_eq!(sc.points, 1 + 4 + 2);
        assert!(has(&sc, "TrueSingleSuit", 4));
        assert!(has(&sc, "AllTriplets", 2));
    }

    #[test]
    fn test_half_suit_with_seat_wind() {
        let sc = score_str("m111333555w22", &["w333"], &cond(WW, WE));
        // 1 + 刻子(2) + 自風(1) + 混一(2)
        assert_eq!(sc.points, 6);
        assert!(has(&sc, "SeatWind", 1));
        assert!(has(&sc, "HalfSuit", 2));
        assert!(!has(&sc, "PrevailingWind", 1));
    }

    #[test]
    fn test_double_wind_and_dragon() {
        let sc = score_str("m123p456w111d22233", &[], &cond(WE, WE));
        // 1 + 自風 + 場風 + 三元牌
        assert_eq!(sc.points, 4);
    }

    #[test]
    fn test_no_half_for_two_numbered_suits() {
        let sc = score_str("m123456789p11122", &[], &cond(WS, WE));
        assert!(!has(&sc, "HalfSuit", 2));
        assert!(has(&sc, "FullStraight", 2));
        assert_eq!(sc.points, 3);

        let sc = score_str("w111222444d11122", &[], &cond(WS, WE));
        assert!(!has(&sc, "HalfSuit", 2));
    }

    #[test]
    fn test_all_sequences() {
        let sc = score_str("m123456p234s678w22", &[], &cond(WE, WE));
        assert!(has(&sc, "AllSequences", 1));
        assert_eq!(sc.points, 2);
    }

    #[test]
    fn test_flowers() {
        let mut c = cond(WS, WE);
        c.flowers = tiles_from_string("b2r2").unwrap();
        let sc = score_str("m123p456s789m555p99", &[], &c);
        assert!(has(&sc, "Flowers", 1));
        assert_eq!(sc.points, 2);

        c.flowers = tiles_from_string("b1").unwrap();
        let sc = score_str("m123p456s789m555p99", &[], &c);
        assert!(has(&sc, "Flowers", -1));
        assert_eq!(sc.points, 0);

        // 一致1枚: 加減点なし
        c.flowers = tiles_from_string("b2r3").unwrap();
        let sc = score_str("m123p456s789m555p99", &[], &c);
        assert_eq!(sc.points, 1);
    }

    #[test]
    fn test_seven_pairs_single_suit() {
        let sc = score_str("m11335577p22s99w44", &[], &cond(WE, WE));
        assert_eq!(sc.points, 1);

        let sc = score_str("p1133557799d1122", &[], &cond(WE, WE));
        assert!(has(&sc, "HalfSuit", 2));

        let sc = score_str("s11224466778899", &[], &cond(WE, WE));
        assert!(has(&sc, "SingleSuit", 3));
    }

    #[test]
    fn test_best_decomposition() {
        // 三連刻: 刻子として数える方が高い
        let sc = score_str("m111222333444p99", &[], &cond(WE, WE));
        assert!(has(&sc, "AllTriplets", 2));
    }

    proptest! {
        // 風牌の刻子と数牌の混一: 加点の合計は分解順に依存しない
        #[test]
        fn prop_wind_triplet_half_suit(
            ti in 0..3usize,
            ranks in prop::collection::btree_set(1..10usize, 3),
            wind in WE..=WN,
            seat_wind in WE..=WN,
            prevailing_wind in WE..=WN,
        ) {
            let mut tiles = vec![];
            for &n in &ranks {
                tiles.extend([Tile(ti, n); 3]);
            }
            tiles.extend([Tile(TW, wind); 3]);
            let pair = (1..10).find(|n| !ranks.contains(n)).unwrap();
            tiles.extend([Tile(ti, pair); 2]);

            let res = analyze(&tiles_to_tile_table(&tiles), None, &[]);
            let sc = score_hand(&res, &cond(seat_wind, prevailing_wind)).unwrap();
            let expected = 1
                + 2
                + 2
                + (wind == seat_wind) as Point
                + (wind == prevailing_wind) as Point;
            prop_assert_eq!(sc.points, expected);
        }
    }
}
