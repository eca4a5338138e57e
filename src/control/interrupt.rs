use tracing::{debug, warn};

use super::common::*;
use super::possible_actions::calc_possible_call_actions;
use crate::error::GameError;
use crate::model::*;

// 打牌に対して問い合わせる内容
#[derive(Debug, Clone)]
pub struct Offer {
    pub seq: u64,
    pub discarder: Seat,
    pub tile: Tile,
    pub actions: [Vec<Action>; SEAT], // 座席ごとの選択肢 (Nopのみの座席は自動でPass)
}

impl Offer {
    // 応答を待つ必要がある座席
    pub fn seats_to_query(&self) -> Vec<Seat> {
        (0..SEAT).filter(|&s| self.actions[s].len() > 1).collect()
    }
}

// 受付の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Win {
        seat: Seat,
        discarder: Seat,
        tile: Tile,
    },
    Claim {
        seat: Seat,
        discarder: Seat,
        tile: Tile,
        action: Action,
    },
    NoClaim {
        discarder: Seat,
        tile: Tile,
    },
}

impl Resolution {
    // 次に行動する座席
    pub fn seat(&self) -> Seat {
        match self {
            Resolution::Win { seat, .. } | Resolution::Claim { seat, .. } => *seat,
            Resolution::NoClaim { discarder, .. } => next_seat(*discarder),
        }
    }
}

#[derive(Debug)]
struct Window {
    seq: u64,
    discarder: Seat,
    tile: Tile,
    actions: [Vec<Action>; SEAT],
    responded: [bool; SEAT],
    responses: Vec<InterruptResponse>, // 受け付けた順
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Collecting(Window),
    Resolved(u64),
}

// 打牌に対する鳴き・ロンの受付
// 受付ごとに新しいseqを発行し,古いseqや解決後の応答は無視する
#[derive(Debug, Default)]
pub struct InterruptCoordinator {
    seq: u64,
    state: State,
}

impl InterruptCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    // ツモ番の問い合わせにも同じ系列の番号を使用
    pub fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // 受付中のseq
    pub fn pending_seq(&self) -> Option<u64> {
        match &self.state {
            State::Collecting(w) => Some(w.seq),
            _ => None,
        }
    }

    pub fn offer_discard(
        &mut self,
        stg: &Stage,
        discarder: Seat,
        tile: Tile,
    ) -> Result<Offer, GameError> {
        if let State::Collecting(w) = &self.state {
            return Err(GameError::WindowOpen { seq: w.seq });
        }
        if stg.phase != Phase::Interrupt(discarder, tile) {
            return Err(GameError::OutOfTurn {
                seat: discarder,
                phase: stg.phase,
            });
        }

        let seq = self.next_seq();
        let actions = calc_possible_call_actions(stg, discarder, tile);
        let mut responded = [false; SEAT];
        for s in 0..SEAT {
            // 打牌者と選択肢がPassのみの座席は自動でPass
            if actions[s].len() <= 1 {
                responded[s] = true;
            }
        }
        debug!("offer seq={} discarder={} tile={}", seq, discarder, tile);

        self.state = State::Collecting(Window {
            seq,
            discarder,
            tile,
            actions: actions.clone(),
            responded,
            responses: vec![],
        });

        Ok(Offer {
            seq,
            discarder,
            tile,
            actions,
        })
    }

    // 応答の登録
    // 受け付けた場合はOk(true), 遅延・重複した応答は無視してOk(false)
    pub fn submit_response(
        &mut self,
        stg: &Stage,
        resp: InterruptResponse,
    ) -> Result<bool, GameError> {
        let w = match &mut self.state {
            State::Collecting(w) => w,
            State::Resolved(seq) => {
                warn!("late response ignored (seq={} already resolved): {:?}", seq, resp);
                return Ok(false);
            }
            State::Idle => {
                warn!("response without window ignored: {:?}", resp);
                return Ok(false);
            }
        };
        if resp.seq != w.seq {
            warn!("stale response ignored (expected seq={}): {:?}", w.seq, resp);
            return Ok(false);
        }

        let seat = resp.seat;
        if seat >= SEAT || seat == w.discarder {
            return Err(GameError::NotOffered {
                seat,
                action: resp.action,
            });
        }
        let act = &resp.action;
        if act.ty != ActionType::Nop {
            let pl = &stg.players[seat];
            let mut need = TileTable::default();
            for &t in &act.tiles {
                inc_tile(&mut need, t);
            }
            if act.tiles.iter().any(|&t| pl.count_tile(t) < need[t.0][t.1]) {
                return Err(GameError::InsufficientTiles {
                    seat,
                    action: resp.action,
                });
            }
            if !w.actions[seat].contains(act) {
                return Err(GameError::NotOffered {
                    seat,
                    action: resp.action,
                });
            }
        }

        if w.responded[seat] {
            warn!("duplicate response ignored: {:?}", resp);
            return Ok(false);
        }

        debug!("response accepted: {:?}", resp);
        w.responded[seat] = true;
        w.responses.push(resp);
        Ok(true)
    }

    // すべての座席が応答済み
    pub fn is_complete(&self) -> bool {
        match &self.state {
            State::Collecting(w) => w.responded.iter().all(|&r| r),
            _ => false,
        }
    }

    // 全員の応答がそろった状態で解決
    pub fn resolve(&mut self) -> Result<Resolution, GameError> {
        if let State::Collecting(w) = &self.state {
            if !w.responded.iter().all(|&r| r) {
                return Err(GameError::WindowOpen { seq: w.seq });
            }
        }
        self.finish()
    }

    // 制限時間切れ 未応答の座席はPass扱い
    pub fn expire(&mut self) -> Result<Resolution, GameError> {
        if let State::Collecting(w) = &self.state {
            for s in 0..SEAT {
                if !w.responded[s] {
                    debug!("seat {} timed out, treated as pass", s);
                }
            }
        }
        self.finish()
    }

    // 優先順位: ロン > ポン・明槓 > チー(下家のみ)
    // 同順位の場合は先に登録された応答
    fn finish(&mut self) -> Result<Resolution, GameError> {
        let w = match std::mem::take(&mut self.state) {
            State::Collecting(w) => w,
            state => {
                self.state = state;
                return Err(GameError::NoWindow);
            }
        };
        self.state = State::Resolved(w.seq);

        let (discarder, tile) = (w.discarder, w.tile);
        let mut best: Option<&InterruptResponse> = None;
        for r in &w.responses {
            if r.action.ty == ActionType::Chi && r.seat != next_seat(discarder) {
                continue;
            }
            let p = r.action.ty.call_priority();
            if p > best.map_or(0, |b| b.action.ty.call_priority()) {
                best = Some(r);
            }
        }

        let res = match best {
            Some(r) if r.action.ty == ActionType::Ron => Resolution::Win {
                seat: r.seat,
                discarder,
                tile,
            },
            Some(r) => Resolution::Claim {
                seat: r.seat,
                discarder,
                tile,
                action: r.action.clone(),
            },
            None => Resolution::NoClaim { discarder, tile },
        };

        debug!("resolved seq={}: {:?}", w.seq, res);
        Ok(res)
    }
}
