use tracing::debug;

use super::common::*;
use super::interrupt::Resolution;
use crate::error::GameError;
use crate::hand::*;
use crate::model::*;

type GameResult<T = Vec<Event>> = Result<T, GameError>;

// ツモ番で可能な宣言
#[derive(Debug, Clone, Default)]
pub struct TurnOptions {
    pub self_win: Option<ScoreContext>, // ツモ和了 (点数が正の場合のみ)
    pub quads: Vec<Tile>,               // 暗槓可能な牌
}

fn expect_phase(stg: &Stage, seat: Seat, phase: Phase) -> GameResult<()> {
    if stg.phase != phase {
        return Err(GameError::OutOfTurn {
            seat,
            phase: stg.phase,
        });
    }
    Ok(())
}

fn set_phase(stg: &mut Stage, phase: Phase) {
    debug!("phase: {} -> {}", stg.phase, phase);
    stg.phase = phase;
    stg.step += 1;
}

// 牌山から1枚引く. 花牌の場合は脇に置いて末尾から引き直す
// 牌山が尽きた場合はNone
fn draw_tile(stg: &mut Stage, seat: Seat, from_tail: bool, evs: &mut Vec<Event>) -> Option<Tile> {
    let mut from_tail = from_tail;
    loop {
        let t = if from_tail {
            stg.wall.pop_back()
        } else {
            stg.wall.pop_front()
        }?;
        evs.push(Event::deal(seat, t, from_tail));
        if !t.is_flower() {
            return Some(t);
        }
        stg.players[seat].flowers.push(t);
        evs.push(Event::flower(seat, t));
        from_tail = true;
    }
}

// 配牌に含まれる花牌を脇に置いて補充牌を引く
pub(super) fn replace_dealt_flowers(stg: &mut Stage, seat: Seat, evs: &mut Vec<Event>) {
    let flowers: Vec<Tile> = stg.players[seat]
        .hand_tiles()
        .into_iter()
        .filter(|t| t.is_flower())
        .collect();
    for f in flowers {
        let pl = &mut stg.players[seat];
        if !dec_tile(&mut pl.hand, f) {
            continue;
        }
        pl.flowers.push(f);
        evs.push(Event::flower(seat, f));
        if let Some(t) = draw_tile(stg, seat, true, evs) {
            inc_tile(&mut stg.players[seat].hand, t);
        }
    }
}

fn exhaust(stg: &mut Stage, evs: &mut Vec<Event>) {
    set_phase(stg, Phase::Ended(RoundEnd::Exhausted));
    let hands = std::array::from_fn(|s| stg.players[s].hand_tiles());
    evs.push(Event::draw(hands));
}

// ツモ
pub fn draw(stg: &mut Stage, seat: Seat) -> GameResult {
    expect_phase(stg, seat, Phase::AwaitingDraw(seat))?;

    let mut evs = vec![];
    match draw_tile(stg, seat, false, &mut evs) {
        Some(t) => {
            stg.players[seat].drawn = Some(t);
            set_phase(stg, Phase::AwaitingDiscard(seat));
        }
        None => exhaust(stg, &mut evs),
    }
    Ok(evs)
}

// ツモ和了の判定 和了形で点数が正の場合のみSome
pub fn evaluate_self_win(stg: &Stage, seat: Seat) -> Option<(HandAnalysisResult, ScoreContext)> {
    let pl = &stg.players[seat];
    let drawn = pl.drawn?;
    let res = analyze(&pl.hand, Some(drawn), &pl.melds);
    let sc = score_hand(&res, &WinConditions::from_stage(stg, seat, true))?;
    if sc.points <= 0 {
        return None;
    }
    Some((res, sc))
}

// ロンの判定 和了形で点数が正の場合のみSome
pub fn evaluate_claim_win(
    stg: &Stage,
    seat: Seat,
    tile: Tile,
) -> Option<(HandAnalysisResult, ScoreContext)> {
    let pl = &stg.players[seat];
    let res = analyze(&pl.hand, Some(tile), &pl.melds);
    let sc = score_hand(&res, &WinConditions::from_stage(stg, seat, false))?;
    if sc.points <= 0 {
        return None;
    }
    Some((res, sc))
}

pub fn turn_options(stg: &Stage, seat: Seat) -> GameResult<TurnOptions> {
    expect_phase(stg, seat, Phase::AwaitingDiscard(seat))?;

    let pl = &stg.players[seat];
    let mut quads = vec![];
    if !stg.wall.is_empty() {
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                let t = Tile(ti, ni);
                if pl.count_tile(t) == TILE {
                    quads.push(t);
                }
            }
        }
    }

    Ok(TurnOptions {
        self_win: evaluate_self_win(stg, seat).map(|(_, sc)| sc),
        quads,
    })
}

fn finish_win(
    stg: &mut Stage,
    seat: Seat,
    from: Option<Seat>,
    winning_tile: Tile,
    res: &HandAnalysisResult,
    score: ScoreContext,
) -> Event {
    let pl = &mut stg.players[seat];
    let mut hand = pl.hand_tiles();
    if let Some(t) = pl.drawn {
        hand.push(t);
    } else {
        hand.push(winning_tile);
    }
    hand.sort();
    pl.score += score.points;

    let ctx = WinContext {
        seat,
        from,
        hand,
        winning_tile,
        shape: res.shape.unwrap_or(WinShape::Standard),
        score,
    };
    set_phase(stg, Phase::Ended(RoundEnd::Win(seat)));
    Event::win(ctx, stg.get_scores())
}

// ツモ和了の宣言
// 和了形でない場合や点数が0以下の場合は卓の状態を変更せずにエラー
pub fn declare_self_win(stg: &mut Stage, seat: Seat) -> GameResult {
    expect_phase(stg, seat, Phase::AwaitingDiscard(seat))?;

    let pl = &stg.players[seat];
    let drawn = pl.drawn.ok_or(GameError::NotWinning { seat })?;
    let res = analyze(&pl.hand, Some(drawn), &pl.melds);
    let sc = score_hand(&res, &WinConditions::from_stage(stg, seat, true))
        .ok_or(GameError::NotWinning { seat })?;
    if sc.points <= 0 {
        return Err(GameError::NonPositiveScore {
            seat,
            points: sc.points,
        });
    }

    Ok(vec![finish_win(stg, seat, None, drawn, &res, sc)])
}

// 暗槓の宣言
// 槓子を晒して末尾から補充牌を引く. 手番は継続
pub fn declare_quad(stg: &mut Stage, seat: Seat, tile: Tile) -> GameResult {
    expect_phase(stg, seat, Phase::AwaitingDiscard(seat))?;

    let action = Action::ankan(tile);
    if stg.players[seat].count_tile(tile) != TILE {
        return Err(GameError::InsufficientTiles { seat, action });
    }
    if stg.wall.is_empty() {
        return Err(GameError::NotOffered { seat, action });
    }

    let step = stg.step;
    let pl = &mut stg.players[seat];
    pl.merge_drawn();
    pl.hand[tile.0][tile.1] = 0;
    pl.melds.push(Meld {
        step,
        seat,
        meld_type: MeldType::Ankan,
        tiles: action.tiles.clone(),
        from: None,
    });

    let mut evs = vec![Event::meld(seat, MeldType::Ankan, action.tiles, None)];
    match draw_tile(stg, seat, true, &mut evs) {
        Some(t) => {
            stg.players[seat].drawn = Some(t);
            stg.step += 1;
        }
        None => exhaust(stg, &mut evs),
    }
    Ok(evs)
}

// 打牌
// ツモ牌を手牌に合流させてから牌を取り除き,鳴き・ロンの受付に移行
pub fn discard(stg: &mut Stage, seat: Seat, tile: Tile) -> GameResult {
    expect_phase(stg, seat, Phase::AwaitingDiscard(seat))?;

    let step = stg.step;
    let pl = &mut stg.players[seat];
    let mut hand = pl.hand;
    if let Some(d) = pl.drawn {
        inc_tile(&mut hand, d);
    }
    if !dec_tile(&mut hand, tile) {
        return Err(GameError::TileNotInHand { seat, tile });
    }

    let is_drawn = pl.drawn == Some(tile);
    pl.hand = hand;
    pl.drawn = None;
    pl.discards.push(Discard {
        step,
        tile,
        is_drawn,
    });
    stg.last_discard = Some((seat, tile));
    set_phase(stg, Phase::Interrupt(seat, tile));

    Ok(vec![Event::discard(seat, tile, is_drawn)])
}

// 鳴かれた・ロンされた牌を打牌者の捨て牌から取り除く
fn take_last_discard(stg: &mut Stage) {
    if let Some((d, t)) = stg.last_discard.take() {
        let dpl = &mut stg.players[d];
        if dpl.discards.last().map(|x| x.tile) == Some(t) {
            dpl.discards.pop();
        }
    }
}

// 鳴き・ロン受付の結果を卓に反映
pub fn execute_claim(stg: &mut Stage, resolution: &Resolution) -> GameResult {
    let (discarder, tile) = match stg.phase {
        Phase::Interrupt(d, t) => (d, t),
        phase => {
            return Err(GameError::OutOfTurn {
                seat: resolution.seat(),
                phase,
            })
        }
    };

    match resolution {
        Resolution::NoClaim { .. } => {
            set_phase(stg, Phase::AwaitingDraw(next_seat(discarder)));
            Ok(vec![])
        }
        Resolution::Win { seat, .. } => {
            let seat = *seat;
            let (res, sc) =
                evaluate_claim_win(stg, seat, tile).ok_or(GameError::NotWinning { seat })?;
            take_last_discard(stg);
            Ok(vec![finish_win(
                stg,
                seat,
                Some(discarder),
                tile,
                &res,
                sc,
            )])
        }
        Resolution::Claim { seat, action, .. } => {
            let seat = *seat;
            let meld_type = match action.ty {
                ActionType::Chi => MeldType::Chi,
                ActionType::Pon => MeldType::Pon,
                ActionType::Minkan => MeldType::Minkan,
                _ => {
                    return Err(GameError::NotOffered {
                        seat,
                        action: action.clone(),
                    })
                }
            };
            let mut hand = stg.players[seat].hand;
            for &t in &action.tiles {
                if !dec_tile(&mut hand, t) {
                    return Err(GameError::InsufficientTiles {
                        seat,
                        action: action.clone(),
                    });
                }
            }

            take_last_discard(stg);

            let step = stg.step;
            let pl = &mut stg.players[seat];
            pl.hand = hand;
            let mut tiles = action.tiles.clone();
            tiles.push(tile);
            tiles.sort();
            pl.melds.push(Meld {
                step,
                seat,
                meld_type,
                tiles: tiles.clone(),
                from: Some((discarder, tile)),
            });

            let mut evs = vec![Event::meld(seat, meld_type, tiles, Some(discarder))];
            set_phase(stg, Phase::AwaitingDiscard(seat));
            if meld_type == MeldType::Minkan {
                match draw_tile(stg, seat, true, &mut evs) {
                    Some(t) => stg.players[seat].drawn = Some(t),
                    None => exhaust(stg, &mut evs),
                }
            }
            Ok(evs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::round::RoundManager;
    use crate::control::wall::create_wall_preset;

    fn start(hands: [&str; SEAT], deal: &str) -> Stage {
        let wall = create_wall_preset(0, hands, deal).unwrap();
        let mut rm = RoundManager::new(0, 0, 3);
        rm.start_round_with_wall(wall).unwrap().0
    }

    #[test]
    fn test_out_of_turn() {
        let mut stg = start(["", "", "", ""], "m1");
        let step = stg.step;
        assert!(matches!(draw(&mut stg, 1), Err(GameError::OutOfTurn { .. })));
        assert!(discard(&mut stg, 0, Tile(TM, 1)).is_err());
        assert_eq!(stg.step, step);
        assert_eq!(stg.phase, Phase::AwaitingDraw(0));
    }

    #[test]
    fn test_draw_and_discard() {
        let mut stg = start(["m123456789p1234", "", "", ""], "s5");
        let evs = draw(&mut stg, 0).unwrap();
        assert_eq!(evs.len(), 1);
        assert_eq!(stg.players[0].drawn, Some(Tile(TS, 5)));
        assert_eq!(stg.players[0].count_total(), 14);

        let err = discard(&mut stg, 0, Tile(TD, 1)).unwrap_err();
        assert_eq!(
            err,
            GameError::TileNotInHand {
                seat: 0,
                tile: Tile(TD, 1)
            }
        );

        discard(&mut stg, 0, Tile(TM, 1)).unwrap();
        let pl = &stg.players[0];
        assert_eq!(pl.drawn, None);
        assert_eq!(pl.count_tile(Tile(TS, 5)), 1);
        assert_eq!(pl.count_total(), 13);
        assert!(!pl.discards[0].is_drawn);
        assert_eq!(stg.phase, Phase::Interrupt(0, Tile(TM, 1)));
    }

    #[test]
    fn test_flower_loop() {
        let mut stg = start(["", "", "", ""], "b1");
        stg.wall.push_back(Tile(TM, 5));
        stg.wall.push_back(Tile(TR, 3));
        let n = stg.wall_count();
        let evs = draw(&mut stg, 0).unwrap();
        // b1 -> r3(末尾) -> m5(末尾)
        assert_eq!(stg.players[0].drawn, Some(Tile(TM, 5)));
        assert!(stg.players[0].flowers.contains(&Tile(TB, 1)));
        assert!(stg.players[0].flowers.contains(&Tile(TR, 3)));
        assert_eq!(stg.wall_count(), n - 3);
        assert_eq!(evs.len(), 5);
    }

    #[test]
    fn test_wall_exhaustion() {
        let mut stg = start(["", "", "", ""], "");
        let last = Tile(TD, DW);
        stg.wall.clear();
        stg.wall.push_back(last);

        draw(&mut stg, 0).unwrap();
        discard(&mut stg, 0, last).unwrap();
        execute_claim(
            &mut stg,
            &Resolution::NoClaim {
                discarder: 0,
                tile: last,
            },
        )
        .unwrap();
        assert_eq!(stg.phase, Phase::AwaitingDraw(1));

        let evs = draw(&mut stg, 1).unwrap();
        assert_eq!(stg.phase, Phase::Ended(RoundEnd::Exhausted));
        assert!(matches!(evs.last(), Some(Event::Draw(_))));
    }

    #[test]
    fn test_self_win() {
        let mut stg = start(["m123456789p1122", "", "", ""], "p2");
        assert!(declare_self_win(&mut stg, 0).is_err());
        draw(&mut stg, 0).unwrap();

        let opt = turn_options(&stg, 0).unwrap();
        assert!(opt.self_win.is_some());
        let evs = declare_self_win(&mut stg, 0).unwrap();
        assert_eq!(stg.phase, Phase::Ended(RoundEnd::Win(0)));
        match &evs[0] {
            Event::Win(e) => {
                assert_eq!(e.context.from, None);
                assert_eq!(e.context.hand.len(), 14);
                assert_eq!(e.scores[0], e.context.score.points);
            }
            _ => panic!(),
        }
    }

    #[test]
    fn test_non_positive_score_rejected() {
        // 三色・花牌の不一致で0点
        let mut stg = start(["m123p456s789m555p9", "", "", ""], "p9");
        stg.players[0].flowers.push(Tile(TB, 3));
        draw(&mut stg, 0).unwrap();
        assert!(turn_options(&stg, 0).unwrap().self_win.is_none());

        let err = declare_self_win(&mut stg, 0).unwrap_err();
        assert_eq!(err, GameError::NonPositiveScore { seat: 0, points: 0 });
        assert_eq!(stg.phase, Phase::AwaitingDiscard(0));
        assert_eq!(stg.players[0].score, 0);
    }

    #[test]
    fn test_declare_quad() {
        let mut stg = start(["m111234567999", "", "", ""], "m9");
        draw(&mut stg, 0).unwrap();
        assert_eq!(turn_options(&stg, 0).unwrap().quads, vec![Tile(TM, 9)]);
        assert!(declare_quad(&mut stg, 0, Tile(TM, 1)).is_err());

        stg.wall.push_back(Tile(TD, DG));
        let n = stg.wall_count();
        declare_quad(&mut stg, 0, Tile(TM, 9)).unwrap();
        let pl = &stg.players[0];
        assert_eq!(stg.phase, Phase::AwaitingDiscard(0));
        assert_eq!(pl.melds[0].meld_type, MeldType::Ankan);
        assert!(pl.drawn.is_some());
        assert_eq!(stg.wall_count(), n - 1);
        // 手牌10枚 + ツモ1枚 + 槓子4枚 = 14 + 槓の数
        assert_eq!(pl.count_total(), 15);
    }

    #[test]
    fn test_execute_claim() {
        let mut stg = start(["m123456789p1234", "p55s111999w111d23", "", ""], "d1");
        draw(&mut stg, 0).unwrap();
        discard(&mut stg, 0, Tile(TP, 4)).unwrap();

        // 手牌にない牌での鳴き
        let bad = Resolution::Claim {
            seat: 1,
            discarder: 0,
            tile: Tile(TP, 4),
            action: Action::chi(Tile(TP, 2), Tile(TP, 3)),
        };
        assert!(matches!(
            execute_claim(&mut stg, &bad),
            Err(GameError::InsufficientTiles { .. })
        ));

        assert_eq!(stg.phase, Phase::Interrupt(0, Tile(TP, 4)));

        stg.players[1].hand[TP][6] += 1;
        let res = Resolution::Claim {
            seat: 1,
            discarder: 0,
            tile: Tile(TP, 4),
            action: Action::chi(Tile(TP, 5), Tile(TP, 6)),
        };
        let evs = execute_claim(&mut stg, &res).unwrap();
        assert_eq!(evs.len(), 1);
        assert_eq!(stg.phase, Phase::AwaitingDiscard(1));
        assert!(stg.players[0].discards.is_empty());
        assert_eq!(stg.players[1].melds[0].tiles.len(), 3);
        assert_eq!(stg.players[1].drawn, None);
    }

    #[test]
    fn test_execute_claim_quad() {
        let mut stg = start(["m123456789p1234", "p444s111999w111d2", "", ""], "d1");
        draw(&mut stg, 0).unwrap();
        discard(&mut stg, 0, Tile(TP, 4)).unwrap();

        stg.wall.push_back(Tile(TS, 5));
        let n = stg.wall_count();
        let res = Resolution::Claim {
            seat: 1,
            discarder: 0,
            tile: Tile(TP, 4),
            action: Action::minkan(Tile(TP, 4)),
        };
        let evs = execute_claim(&mut stg, &res).unwrap();
        assert!(matches!(evs[1], Event::Deal(_)));
        assert_eq!(stg.phase, Phase::AwaitingDiscard(1));
        assert!(stg.players[0].discards.is_empty());

        // 末尾から補充牌
        let pl = &stg.players[1];
        assert_eq!(pl.drawn, Some(Tile(TS, 5)));
        assert_eq!(stg.wall_count(), n - 1);
        assert_eq!(pl.melds[0].meld_type, MeldType::Minkan);
        assert_eq!(pl.melds[0].tiles, vec![Tile(TP, 4); 4]);
        assert_eq!(pl.count_tile(Tile(TP, 4)), 0);
        // 手牌10枚 + ツモ1枚 + 槓子4枚
        assert_eq!(pl.count_total(), 15);
    }

    #[test]
    fn test_claim_win_takes_discard() {
        let mut stg = start(["", "m1357p1357s1357w1", "", "p66678s123456w11"], "p6");
        draw(&mut stg, 0).unwrap();
        discard(&mut stg, 0, Tile(TP, 6)).unwrap();
        assert_eq!(stg.last_discard, Some((0, Tile(TP, 6))));

        // 和了形でない座席のロンは卓を変更しない
        let bad = Resolution::Win {
            seat: 1,
            discarder: 0,
            tile: Tile(TP, 6),
        };
        assert!(matches!(
            execute_claim(&mut stg, &bad),
            Err(GameError::NotWinning { seat: 1 })
        ));
        assert_eq!(stg.players[0].discards.len(), 1);
        assert_eq!(stg.last_discard, Some((0, Tile(TP, 6))));

        let res = Resolution::Win {
            seat: 3,
            discarder: 0,
            tile: Tile(TP, 6),
        };
        let evs = execute_claim(&mut stg, &res).unwrap();
        assert_eq!(stg.phase, Phase::Ended(RoundEnd::Win(3)));
        assert!(stg.players[0].discards.is_empty());
        assert_eq!(stg.last_discard, None);
        match &evs[0] {
            Event::Win(e) => {
                assert_eq!(e.context.from, Some(0));
                assert_eq!(e.context.winning_tile, Tile(TP, 6));
                assert_eq!(e.context.hand.len(), 14);
            }
            _ => panic!(),
        }
    }
}
