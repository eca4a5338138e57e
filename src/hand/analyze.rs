use serde::Serialize;

use crate::control::common::{count_tiles, inc_tile};
use crate::model::*;

use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetPairType {
    Pair,     // 雀頭
    Sequence, // 順子
    Triplet,  // 刻子
    Quad,     // 槓子
}

// tileは順子の場合は先頭の牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetPair {
    pub ty: SetPairType,
    pub tile: Tile,
    pub is_open: bool, // 鳴きによる面子
}

impl SetPair {
    #[inline]
    pub fn new(ty: SetPairType, tile: Tile) -> Self {
        Self {
            ty,
            tile,
            is_open: false,
        }
    }

    // 刻子または槓子
    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self.ty, Triplet | Quad)
    }

    pub fn tiles(&self) -> Vec<Tile> {
        let Tile(ti, ni) = self.tile;
        match self.ty {
            Pair => vec![self.tile; 2],
            Sequence => vec![Tile(ti, ni), Tile(ti, ni + 1), Tile(ti, ni + 2)],
            Triplet => vec![self.tile; 3],
            Quad => vec![self.tile; 4],
        }
    }
}

impl std::fmt::Display for SetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ts: Vec<String> = self.tiles().iter().map(|t| t.to_string()).collect();
        write!(f, "{}", ts.join(""))
    }
}

pub type ParsedHand = Vec<SetPair>;

// 和了形の分解
// setsは雀頭と鳴きを含むすべての面子, tilesは鳴きを含むすべての牌 (花牌は除く)
#[derive(Debug, Clone, Serialize)]
pub struct Decomposition {
    pub shape: WinShape,
    pub sets: ParsedHand,
    pub tiles: TileTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandAnalysisResult {
    pub is_win: bool,
    pub shape: Option<WinShape>,
    pub decompositions: Vec<Decomposition>, // 通常形の場合はすべての分解 (先頭が代表)
    pub is_single_suit: bool,
}

impl HandAnalysisResult {
    #[inline]
    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decompositions.first()
    }
}

// 鳴きをSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    melds
        .iter()
        .map(|m| {
            let ty = match m.meld_type {
                MeldType::Chi => Sequence,
                MeldType::Pon => Triplet,
                MeldType::Minkan | MeldType::Ankan => Quad,
            };
            SetPair {
                ty,
                tile: m.tiles[0],
                is_open: m.from.is_some(),
            }
        })
        .collect()
}

// 手牌(鳴き以外)から花牌を除いた和了判定用の牌
// ロンの場合はdrawnに和了牌を渡す
pub fn functional_tiles(hand: &TileTable, drawn: Option<Tile>) -> TileTable {
    let mut tt = *hand;
    if let Some(t) = drawn {
        inc_tile(&mut tt, t);
    }
    tt[TB] = TileRow::default();
    tt[TR] = TileRow::default();
    tt
}

// 和了判定
// 通常形 -> 七対子 -> 国士無双の順に判定. いずれにも該当しなければ和了形ではない
// 枚数は入力から毎回数え直すので,手牌の枚数が不正な場合も単に和了形ではないと判定される
pub fn analyze(hand: &TileTable, drawn: Option<Tile>, melds: &[Meld]) -> HandAnalysisResult {
    let tt = functional_tiles(hand, drawn);
    let pm = parse_melds(melds);

    let mut all = tt;
    for m in melds {
        for &t in &m.tiles {
            inc_tile(&mut all, t);
        }
    }
    let is_single_suit = count_suits(&all) == 1;

    let mut res = HandAnalysisResult {
        is_win: false,
        shape: None,
        decompositions: vec![],
        is_single_suit,
    };

    if melds.len() > 4 {
        return res;
    }
    let n_sets = 4 - melds.len();
    if count_tiles(&tt) != n_sets * 3 + 2 {
        return res;
    }

    let mut decompositions = vec![];
    for ph in parse_into_normal_win(&tt, n_sets) {
        let mut sets = ph;
        sets.extend(pm.iter().copied());
        decompositions.push(Decomposition {
            shape: WinShape::Standard,
            sets,
            tiles: all,
        });
    }

    if decompositions.is_empty() && melds.is_empty() {
        if let Some(ph) = parse_into_seven_pairs(&tt) {
            decompositions.push(Decomposition {
                shape: WinShape::SevenPairs,
                sets: ph,
                tiles: all,
            });
        } else if is_thirteen_distinct(&tt) {
            decompositions.push(Decomposition {
                shape: WinShape::ThirteenDistinct,
                sets: vec![],
                tiles: all,
            });
        }
    }

    if let Some(d) = decompositions.first() {
        res.is_win = true;
        res.shape = Some(d.shape);
    }
    res.decompositions = decompositions;
    res
}

// 手牌が通常形なら雀頭+面子に分解したすべての組み合わせを返却
// 雀頭候補ごとに残りの牌をtry_form_exact_setsで探索する
pub fn parse_into_normal_win(tt: &TileTable, n_sets: usize) -> Vec<ParsedHand> {
    let mut tt = *tt;
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] < 2 {
                continue;
            }
            tt[ti][ni] -= 2;
            let mut cur = vec![SetPair::new(Pair, Tile(ti, ni))];
            try_form_exact_sets(&mut tt, n_sets, &mut cur, &mut res);
            tt[ti][ni] += 2;
        }
    }
    res
}

// 残りの牌をちょうどn_sets個の面子(刻子,順子)に分解するバックトラック探索
// 最も小さい牌は必ず刻子か,その牌から始まる順子のどちらかに含まれるので
// その2通りを試して再帰する. 牌が余った場合や面子が不足した場合は失敗
// 見つかった分解はすべてresに追加
pub fn try_form_exact_sets(
    tt: &mut TileTable,
    n_sets: usize,
    cur: &mut ParsedHand,
    res: &mut Vec<ParsedHand>,
) {
    let t = match first_tile(tt) {
        Some(t) => t,
        None => {
            if n_sets == 0 {
                res.push(cur.clone());
            }
            return;
        }
    };
    if n_sets == 0 {
        return;
    }

    let Tile(ti, ni) = t;

    // 刻子
    if tt[ti][ni] >= 3 {
        tt[ti][ni] -= 3;
        cur.push(SetPair::new(Triplet, t));
        try_form_exact_sets(tt, n_sets - 1, cur, res);
        cur.pop();
        tt[ti][ni] += 3;
    }

    // 順子 (数牌のみ)
    if t.is_suit() && ni <= 7 && tt[ti][ni + 1] > 0 && tt[ti][ni + 2] > 0 {
        for i in 0..3 {
            tt[ti][ni + i] -= 1;
        }
        cur.push(SetPair::new(Sequence, t));
        try_form_exact_sets(tt, n_sets - 1, cur, res);
        cur.pop();
        for i in 0..3 {
            tt[ti][ni + i] += 1;
        }
    }
}

fn first_tile(tt: &TileTable) -> Option<Tile> {
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] != 0 {
                return Some(Tile(ti, ni));
            }
        }
    }
    None
}

// 七対子: 各牌の枚数が2または4(2組の対子として扱う)で計7組
pub fn parse_into_seven_pairs(tt: &TileTable) -> Option<ParsedHand> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match tt[ti][ni] {
                0 => {}
                2 => res.push(SetPair::new(Pair, Tile(ti, ni))),
                4 => {
                    res.push(SetPair::new(Pair, Tile(ti, ni)));
                    res.push(SetPair::new(Pair, Tile(ti, ni)));
                }
                _ => return None,
            }
        }
    }

    if res.len() == 7 {
        Some(res)
    } else {
        None
    }
}

// 国士無双: 么九牌13種をすべて含み,種類数がちょうど13
pub fn is_thirteen_distinct(tt: &TileTable) -> bool {
    if count_tiles(tt) != 14 {
        return false;
    }

    for ti in [TM, TP, TS] {
        if tt[ti][1] == 0 || tt[ti][9] == 0 {
            return false;
        }
    }
    for ni in WE..=WN {
        if tt[TW][ni] == 0 {
            return false;
        }
    }
    for ni in DW..=DR {
        if tt[TD][ni] == 0 {
            return false;
        }
    }

    let mut n_distinct = 0;
    for row in tt {
        n_distinct += row.iter().filter(|&&n| n != 0).count();
    }
    n_distinct == 13
}

// 含まれている牌種(花牌を除く)の数
pub fn count_suits(tt: &TileTable) -> usize {
    present_suits(tt).len()
}

pub fn present_suits(tt: &TileTable) -> Vec<Type> {
    (TM..=TD)
        .filter(|&ti| tt[ti].iter().any(|&n| n != 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::control::common::{meld_from_string, tiles_from_string, tiles_to_tile_table};

    fn analyze_str(exp: &str) -> HandAnalysisResult {
        let tiles = tiles_from_string(exp).unwrap();
        let (drawn, hand) = tiles.split_last().unwrap();
        analyze(&tiles_to_tile_table(hand), Some(*drawn), &[])
    }

    // 分解した牌の合計が元の牌と完全に一致すること
    fn assert_exact_cover(d: &Decomposition) {
        let mut tt = TileTable::default();
        for sp in &d.sets {
            for t in sp.tiles() {
                inc_tile(&mut tt, t);
            }
        }
        if d.shape != WinShape::ThirteenDistinct {
            assert_eq!(tt, d.tiles, "{:?}", d.sets);
        }
    }

    #[test]
    fn test_standard_win() {
        let res = analyze_str("m123456789p11w222");
        assert!(res.is_win);
        assert_eq!(res.shape, Some(WinShape::Standard));
        let d = res.decomposition().unwrap();
        assert_eq!(d.sets.len(), 5);
        assert_exact_cover(d);
    }

    #[test]
    fn test_overlapping_runs() {
        // 一色の重なった順子 (貪欲に先頭から順子を取ると失敗する形)
        let res = analyze_str("m11122345567888");
        assert!(res.is_win);
        for d in &res.decompositions {
            assert_exact_cover(d);
        }

        let res = analyze_str("m111223455678889");
        assert!(!res.is_win); // 15枚

        let res = analyze_str("m1122334455667");
        assert!(!res.is_win);

        let res = analyze_str("m11223344556677");
        assert!(res.is_win);
        assert_eq!(res.shape, Some(WinShape::Standard));
        for d in &res.decompositions {
            assert_exact_cover(d);
        }

        let res = analyze_str("m11122233344455");
        assert!(res.is_win);
        assert_eq!(res.shape, Some(WinShape::Standard));
        assert!(res.decompositions.len() > 1);
        for d in &res.decompositions {
            assert_exact_cover(d);
        }
    }

    #[test]
    fn test_multiple_decompositions() {
        // 三連刻: 刻子x3 または 順子x3
        let res = analyze_str("m111222333p456w33");
        assert!(res.is_win);
        let mut has_triplets = false;
        let mut has_sequences = false;
        for d in &res.decompositions {
            assert_exact_cover(d);
            let n_triplet = d.sets.iter().filter(|s| s.ty == Triplet).count();
            has_triplets |= n_triplet == 3;
            has_sequences |= n_triplet == 0;
        }
        assert!(has_triplets && has_sequences);
    }

    #[test]
    fn test_not_win() {
        assert!(!analyze_str("m123456789p12w222").is_win);
        assert!(!analyze_str("m123456789p11w22").is_win); // 13枚
        assert!(!analyze_str("w1234d123m19p19s1").is_win);
        assert!(!analyze(&TileTable::default(), None, &[]).is_win);
    }

    #[test]
    fn test_honor_sequence_is_not_a_set() {
        assert!(!analyze_str("w123d123m123p123s11").is_win);
    }

    #[test]
    fn test_flowers_are_ignored() {
        let tiles = tiles_from_string("m123456789p11w222b1r3").unwrap();
        let tt = tiles_to_tile_table(&tiles);
        let res = analyze(&tt, None, &[]);
        assert!(res.is_win);
    }

    #[test]
    fn test_with_melds() {
        let melds = vec![
            meld_from_string("p777", 0, false).unwrap(),
            meld_from_string("w3333", 0, true).unwrap(),
        ];
        let hand = tiles_to_tile_table(&tiles_from_string("m12345d11").unwrap());
        let res = analyze(&hand, Some(Tile(TM, 3)), &melds);
        assert!(res.is_win);
        let d = res.decomposition().unwrap();
        assert_eq!(d.sets.len(), 5);
        assert_eq!(d.sets.iter().filter(|s| s.is_open).count(), 1);
        assert!(d.sets.iter().any(|s| s.ty == Quad && !s.is_open));

        // 面子数に対して牌が多い
        let res = analyze(&hand, Some(Tile(TM, 3)), &melds[..1]);
        assert!(!res.is_win);
    }

    #[test]
    fn test_seven_pairs() {
        let res = analyze_str("m1133p2255s99w44d22");
        assert!(res.is_win);
        assert_eq!(res.shape, Some(WinShape::SevenPairs));

        // 同じ牌4枚は2組の対子
        let res = analyze_str("m1111p2255s99w44d22");
        assert!(res.is_win);
        assert_eq!(res.shape, Some(WinShape::SevenPairs));
        assert_eq!(res.decomposition().unwrap().sets.len(), 7);

        // 通常形としても分解できる場合は通常形を優先
        let res = analyze_str("m112233p445566s99");
        assert_eq!(res.shape, Some(WinShape::Standard));

        // 鳴きがある場合は不可
        let melds = vec![meld_from_string("p777", 0, false).unwrap()];
        let hand = tiles_to_tile_table(&tiles_from_string("m1133p22s99w44d2").unwrap());
        assert!(!analyze(&hand, Some(Tile(TD, DG)), &melds).is_win);
    }

    #[test]
    fn test_thirteen_distinct() {
        let res = analyze_str("m19p19s19w1234d1233");
        assert!(res.is_win);
        assert_eq!(res.shape, Some(WinShape::ThirteenDistinct));

        // 么九牌以外が混ざっている
        assert!(!analyze_str("m159p19s19w1234d123").is_win);
        // 対子が2組
        assert!(!analyze_str("m19p19s19w1234d1122").is_win);
    }

    #[test]
    fn test_single_suit() {
        assert!(analyze_str("m11122233345699").is_single_suit);
        assert!(!analyze_str("m123456789p11w222").is_single_suit);
    }

    fn tile_of(ti: Type, n: usize) -> Tile {
        Tile(ti, (n - 1) % MAX_TNUM[ti] + 1)
    }

    fn arb_winning_hand() -> impl Strategy<Value = Vec<Tile>> {
        let set = (any::<bool>(), 0..5usize, 1..10usize);
        (prop::collection::vec(set, 4), (0..5usize, 1..10usize)).prop_map(|(sets, (pti, pn))| {
            let mut tiles = vec![tile_of(pti, pn); 2];
            for (is_seq, ti, n) in sets {
                let t = tile_of(ti, n);
                if is_seq && t.is_suit() && t.1 <= 7 {
                    tiles.extend([t, Tile(t.0, t.1 + 1), Tile(t.0, t.1 + 2)]);
                } else {
                    tiles.extend([t; 3]);
                }
            }
            tiles
        })
    }

    fn is_valid_count(tiles: &[Tile]) -> bool {
        tiles_to_tile_table(tiles)
            .iter()
            .all(|r| r.iter().all(|&n| n <= TILE))
    }

    proptest! {
        #[test]
        fn prop_decomposable_hand_wins(tiles in arb_winning_hand(), k in 0..14usize) {
            prop_assume!(is_valid_count(&tiles));
            let mut hand = tiles.clone();
            let drawn = hand.remove(k);
            let res = analyze(&tiles_to_tile_table(&hand), Some(drawn), &[]);
            prop_assert!(res.is_win);
            prop_assert_eq!(res.shape, Some(WinShape::Standard));
            for d in &res.decompositions {
                assert_exact_cover(d);
            }
        }

        #[test]
        fn prop_win_never_leaves_tiles(
            raw in prop::collection::vec((0..5usize, 1..10usize), 14)
        ) {
            let tiles: Vec<Tile> = raw.iter().map(|&(ti, n)| tile_of(ti, n)).collect();
            prop_assume!(is_valid_count(&tiles));
            let res = analyze(&tiles_to_tile_table(&tiles), None, &[]);
            for d in &res.decompositions {
                assert_exact_cover(d);
            }
            if res.shape == Some(WinShape::Standard) {
                for d in &res.decompositions {
                    prop_assert_eq!(d.sets.len(), 5);
                }
            }
        }

        #[test]
        fn prop_seven_pairs_shape_wins(
            raw in prop::collection::vec((0..5usize, 1..10usize), 7)
        ) {
            let mut tiles = vec![];
            for &(ti, n) in &raw {
                tiles.push(tile_of(ti, n));
                tiles.push(tile_of(ti, n));
            }
            prop_assume!(is_valid_count(&tiles));
            let tt = tiles_to_tile_table(&tiles);
            let res = analyze(&tt, None, &[]);
            prop_assert!(res.is_win);
            if parse_into_normal_win(&tt, 4).is_empty() {
                prop_assert_eq!(res.shape, Some(WinShape::SevenPairs));
            } else {
                prop_assert_eq!(res.shape, Some(WinShape::Standard));
            }
        }
    }
}
