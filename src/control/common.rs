use crate::error::ParseError;
use crate::model::*;

#[inline]
pub fn calc_seat_offset(base_seat: Seat, target_seat: Seat) -> Seat {
    (target_seat + SEAT - base_seat) % SEAT
}

#[inline]
pub fn calc_seat_wind(dealer: Seat, seat: Seat) -> Tnum {
    calc_seat_offset(dealer, seat) + 1 // WE | WS | WW | WN
}

#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % SEAT
}

#[inline]
pub fn next_wind(wind: Tnum) -> Tnum {
    wind % WN + 1 // WE -> WS -> WW -> WN -> WE
}

// TileTable
pub fn count_tiles(tt: &TileTable) -> usize {
    tt.iter().map(|r| r.iter().sum::<usize>()).sum()
}

pub fn inc_tile(tt: &mut TileTable, t: Tile) {
    tt[t.0][t.1] += 1;
}

// 0枚の牌は減らさずにfalse
#[must_use]
pub fn dec_tile(tt: &mut TileTable, t: Tile) -> bool {
    if tt[t.0][t.1] == 0 {
        return false;
    }
    tt[t.0][t.1] -= 1;
    true
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut tiles = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for _ in 0..tt[ti][ni] {
                tiles.push(Tile(ti, ni));
            }
        }
    }
    tiles
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// "m123p55w111" のような表記を牌のリストに変換
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, ParseError> {
    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            '0'..='9' => {
                let ti = ti.ok_or(ParseError::NumberBeforeType)?;
                let ni = c as usize - '0' as usize;
                tiles.push(Tile::new(ti, ni)?);
            }
            _ => ti = Some(type_from_char(c)?),
        }
    }
    Ok(tiles)
}

// "p777", "m345", "w1111" のような表記を面子に変換
// 4枚の場合, is_concealedがtrueなら暗槓, そうでなければ明槓
pub fn meld_from_string(exp: &str, seat: Seat, is_concealed: bool) -> Result<Meld, ParseError> {
    let mut tiles = tiles_from_string(exp)?;
    tiles.sort();
    let invalid = || ParseError::InvalidMeld(exp.to_string());
    if tiles.iter().any(|t| t.is_flower()) || tiles.len() < 3 {
        return Err(invalid());
    }

    let t0 = tiles[0];
    let is_same = tiles.iter().all(|&t| t == t0);
    let is_seq = t0.is_suit()
        && tiles[1] == Tile(t0.0, t0.1 + 1)
        && tiles[2] == Tile(t0.0, t0.1 + 2);
    let meld_type = match tiles.len() {
        3 if is_same => MeldType::Pon,
        3 if is_seq => MeldType::Chi,
        4 if is_same && is_concealed => MeldType::Ankan,
        4 if is_same => MeldType::Minkan,
        _ => return Err(invalid()),
    };

    // 鳴いた相手は計算上関係ないので上家で固定
    let from = if meld_type == MeldType::Ankan {
        None
    } else {
        Some(((seat + SEAT - 1) % SEAT, t0))
    };

    Ok(Meld {
        step: 0,
        seat,
        meld_type,
        tiles,
        from,
    })
}

pub fn wind_from_char(c: char) -> Result<Tnum, ParseError> {
    Ok(match c {
        'E' | '1' => WE,
        'S' | '2' => WS,
        'W' | '3' => WW,
        'N' | '4' => WN,
        _ => return Err(ParseError::InvalidChar(c)),
    })
}
