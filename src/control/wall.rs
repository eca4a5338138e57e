use rand::prelude::*;

use super::common::*;
use crate::error::ParseError;
use crate::model::*;

// 牌の総数 数牌108 + 風牌16 + 三元牌12 + 花牌8
pub const WALL_SIZE: usize = 144;

// 配牌の枚数
pub const HAND_SIZE: usize = 13;

// 花牌を含むすべての牌
fn full_tile_table() -> TileTable {
    let mut tt = TileTable::default();
    for ti in 0..TYPE {
        let n = if ti == TB || ti == TR { 1 } else { TILE };
        for ni in 1..=MAX_TNUM[ti] {
            tt[ti][ni] = n;
        }
    }
    tt
}

pub fn create_wall(seed: u64) -> Vec<Tile> {
    let mut wall = tiles_from_tile_table(&full_tile_table());
    let mut rng = StdRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);
    wall
}

// 作為的な牌山を生成 指定がない場所はシード値に従ってランダムに生成
// handsは各座席の配牌(最大13枚), dealは配牌後の牌山の先頭(最初の牌は親の1巡目のツモ)
pub fn create_wall_preset(
    seed: u64,
    hands: [&str; SEAT],
    deal: &str,
) -> Result<Vec<Tile>, ParseError> {
    let mut tt = full_tile_table();
    let hands: Vec<Vec<Tile>> = hands
        .iter()
        .map(|h| tiles_from_string(h))
        .collect::<Result<_, _>>()?;
    let deal = tiles_from_string(deal)?;

    for h in &hands {
        if h.len() > HAND_SIZE {
            return Err(ParseError::InvalidItem(vec_to_exp(h)));
        }
    }
    for &t in hands.iter().flatten().chain(deal.iter()) {
        if !dec_tile(&mut tt, t) {
            return Err(ParseError::InvalidTile(t.to_string()));
        }
    }

    // 余った牌をランダムにシャッフル
    let mut remain = tiles_from_tile_table(&tt);
    let mut rng = StdRng::seed_from_u64(seed);
    remain.shuffle(&mut rng);

    let mut wall = vec![];
    for h in &hands {
        wall.extend(h);
        move_tiles(&mut remain, &mut wall, HAND_SIZE - h.len());
    }
    wall.extend(&deal);
    wall.append(&mut remain);
    Ok(wall)
}

fn move_tiles(source: &mut Vec<Tile>, target: &mut Vec<Tile>, count: usize) {
    target.extend(source.drain(..count));
}

fn vec_to_exp(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_wall() {
        let wall = create_wall(0);
        assert_eq!(wall.len(), WALL_SIZE);
        assert_eq!(wall.iter().filter(|t| t.is_flower()).count(), 8);
        assert_eq!(wall.iter().filter(|t| t.is_suit()).count(), 108);
        assert_eq!(wall.iter().filter(|t| t.is_wind()).count(), 16);

        // 同じシードなら同じ牌山
        assert_eq!(wall, create_wall(0));
    }

    #[test]
    fn test_create_wall_preset() {
        let wall = create_wall_preset(1, ["m11123456789999", "", "", "w1"], "d3").unwrap_err();
        assert!(matches!(wall, ParseError::InvalidItem(_)));

        let wall = create_wall_preset(1, ["m111234567899", "", "", "w1"], "d3b1").unwrap();
        assert_eq!(wall.len(), WALL_SIZE);
        assert_eq!(wall[..13], tiles_from_string("m111234567899").unwrap()[..]);
        assert_eq!(wall[39], Tile(TW, WE));
        assert_eq!(wall[52], Tile(TD, DR));
        assert_eq!(wall[53], Tile(TB, 1));
        assert_eq!(tiles_to_tile_table(&wall), full_tile_table());

        // 5枚目の牌
        assert!(matches!(
            create_wall_preset(1, ["m11111", "", "", ""], ""),
            Err(ParseError::InvalidTile(_))
        ));
    }
}
