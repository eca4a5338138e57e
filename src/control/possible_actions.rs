use super::common::*;
use super::turn::{evaluate_claim_win, turn_options};
use crate::model::*;

// [Turn Action Check]
// プレイヤーのツモ番に可能な操作
// Nop(ツモ切り), Discard(打牌可能な牌の一覧), Ankan, Tsumo
pub fn calc_possible_turn_actions(stg: &Stage, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    let mut acts = vec![Action::nop()];

    let mut tiles = pl.hand_tiles();
    if let Some(t) = pl.drawn {
        tiles.push(t);
    }
    tiles.sort();
    tiles.dedup();
    acts.push(Action::new(ActionType::Discard, tiles));

    // ツモ番でない場合は暗槓・ツモなし
    if let Ok(opt) = turn_options(stg, seat) {
        acts.extend(opt.quads.into_iter().map(Action::ankan));
        if opt.self_win.is_some() {
            acts.push(Action::tsumo());
        }
    }

    acts
}

// [Call Action Check]
// 打牌に対して各プレイヤーが可能な操作
// 打牌者は空, それ以外の座席は先頭にNop(Pass)を含む
pub fn calc_possible_call_actions(stg: &Stage, discarder: Seat, tile: Tile) -> [Vec<Action>; SEAT] {
    std::array::from_fn(|s| {
        if s == discarder {
            return vec![];
        }

        let mut acts = vec![Action::nop()];
        if s == next_seat(discarder) {
            acts.append(&mut check_chi(stg, s, tile));
        }
        acts.append(&mut check_pon(stg, s, tile));
        acts.append(&mut check_minkan(stg, s, tile));
        acts.append(&mut check_ron(stg, s, tile));
        acts
    })
}

fn check_chi(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    if !tile.is_suit() {
        return vec![];
    }

    let pl = &stg.players[seat];
    let Tile(ti, ni) = tile;
    let mut acts = vec![];
    // (-2, -1), (-1, +1), (+1, +2)
    for (d0, d1) in [(-2, -1), (-1, 1), (1, 2)] {
        let n0 = ni as isize + d0;
        let n1 = ni as isize + d1;
        if n0 < 1 || n1 > 9 {
            continue;
        }
        let t0 = Tile(ti, n0 as Tnum);
        let t1 = Tile(ti, n1 as Tnum);
        if pl.count_tile(t0) > 0 && pl.count_tile(t1) > 0 {
            acts.push(Action::chi(t0, t1));
        }
    }
    acts
}

fn check_pon(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    if stg.players[seat].count_tile(tile) >= 2 {
        vec![Action::pon(tile)]
    } else {
        vec![]
    }
}

fn check_minkan(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    // 補充牌が必要
    if stg.wall.is_empty() {
        return vec![];
    }

    if stg.players[seat].count_tile(tile) >= 3 {
        vec![Action::minkan(tile)]
    } else {
        vec![]
    }
}

fn check_ron(stg: &Stage, seat: Seat, tile: Tile) -> Vec<Action> {
    if evaluate_claim_win(stg, seat, tile).is_some() {
        vec![Action::ron()]
    } else {
        vec![]
    }
}
