use std::future::Future;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::{
    actor::{ActionFuture, Actor},
    interrupt::InterruptCoordinator,
    listener::Listener,
    possible_actions::calc_possible_turn_actions,
    round::RoundManager,
    turn::*,
};
use crate::{
    error::GameError,
    model::*,
    util::{
        misc::vec_to_string,
        waiter::{waiter_waker, Waiter},
    },
};

// 選択待ちのFutureの一覧
struct PendingSelections {
    futures: Vec<(Seat, ActionFuture)>,
}

impl PendingSelections {
    fn new() -> Self {
        Self { futures: vec![] }
    }

    fn push(&mut self, seat: Seat, f: ActionFuture) {
        self.futures.push((seat, f));
    }

    fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    // 完了したFutureを取り除いて結果を返却
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Vec<(Seat, Action)> {
        let mut ready = vec![];
        self.futures.retain_mut(|(s, f)| match f.as_mut().poll(cx) {
            Poll::Ready(act) => {
                ready.push((*s, act));
                false
            }
            Poll::Pending => true,
        });
        ready
    }

    fn seats(&self) -> Vec<Seat> {
        self.futures.iter().map(|(s, _)| *s).collect()
    }
}

#[derive(Debug)]
pub struct MahjongEngine {
    seed: u64,
    rule: Rule,
    rounds: RoundManager,
    stage: Stage,
    coordinator: InterruptCoordinator,
    actors: [Box<dyn Actor>; SEAT],
    listeners: Vec<Box<dyn Listener>>,
    // 非同期制御
    waiter: Waiter,
    waker: Waker,
}

impl MahjongEngine {
    pub fn new(
        seed: u64,
        rule: Rule,
        actors: [Box<dyn Actor>; SEAT],
        listeners: Vec<Box<dyn Listener>>,
    ) -> Self {
        let (waiter, waker) = waiter_waker();
        Self {
            seed,
            rounds: RoundManager::new(seed, 0, rule.retention_limit),
            rule,
            stage: Stage::default(),
            coordinator: InterruptCoordinator::new(),
            actors,
            listeners,
            waiter,
            waker,
        }
    }

    #[inline]
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn get_stage(&self) -> &Stage {
        &self.stage
    }

    // 設定された局数を対局して最終得点を返却
    pub fn run(&mut self) -> Result<[Point; SEAT], GameError> {
        for _ in 0..self.rule.n_round {
            self.run_round()?;
        }
        let scores = self.rounds.scores();
        info!("game end: scores={:?}", scores);
        Ok(scores)
    }

    pub fn run_round(&mut self) -> Result<RoundEnd, GameError> {
        let (stg, evs) = self.rounds.start_round()?;
        self.run_stage(stg, evs)
    }

    // 配牌済みの卓から局終了まで進行
    pub fn run_stage(&mut self, stg: Stage, evs: Vec<Event>) -> Result<RoundEnd, GameError> {
        self.stage = stg;
        self.coordinator = InterruptCoordinator::new();
        for s in 0..SEAT {
            self.actors[s].init(s);
        }
        self.handle_events(evs);

        let end = loop {
            match self.stage.phase {
                Phase::AwaitingDraw(s) => {
                    let evs = draw(&mut self.stage, s)?;
                    self.handle_events(evs);
                }
                Phase::AwaitingDiscard(s) => self.do_turn_operation(s)?,
                Phase::Interrupt(d, t) => self.do_call_operation(d, t)?,
                Phase::Ended(end) => break end,
                Phase::Idle => {
                    return Err(GameError::OutOfTurn {
                        seat: NO_SEAT,
                        phase: Phase::Idle,
                    })
                }
            }
        };

        match end {
            RoundEnd::Win(s) => {
                self.rounds.handle_win(s);
            }
            RoundEnd::Exhausted => {
                self.rounds.handle_draw();
            }
        }
        self.rounds.update_scores(self.stage.get_scores());
        Ok(end)
    }

    fn handle_events(&mut self, evs: Vec<Event>) {
        for ev in &evs {
            // Actorより先にListenerにイベントを通知
            for l in &mut self.listeners {
                l.notify_event(&self.stage, ev);
            }
            for a in &mut self.actors {
                a.notify_event(&self.stage, ev);
            }
        }
    }

    // Actorの選択を待機 制限時間内に完了しなかった場合はNone
    fn query_turn_action(&mut self, seat: Seat, acts: &[Action]) -> Option<Action> {
        let seq = self.coordinator.next_seq();
        let mut pending = PendingSelections::new();
        pending.push(seat, self.actors[seat].select(&self.stage, seq, acts));

        let timeout = Duration::from_millis(self.rule.turn_timeout_ms);
        let deadline = Instant::now() + timeout;
        let mut cx = Context::from_waker(&self.waker);
        loop {
            if let Some((_, act)) = pending.poll_ready(&mut cx).pop() {
                return Some(act);
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            self.waiter.wait_timeout(deadline - now);
        }

        warn!("seat {} turn action timed out (seq={})", seat, seq);
        self.actors[seat].expire(seq);
        None
    }

    fn do_turn_operation(&mut self, seat: Seat) -> Result<(), GameError> {
        let acts = calc_possible_turn_actions(&self.stage, seat);
        let act = self
            .query_turn_action(seat, &acts)
            .unwrap_or_else(Action::nop);
        debug!("seat {} selected {}", seat, act);

        let res = match act.ty {
            ActionType::Discard if act.tiles.len() == 1 && is_discardable(&acts, act.tiles[0]) => {
                discard(&mut self.stage, seat, act.tiles[0])
            }
            ActionType::Ankan if acts.contains(&act) => {
                declare_quad(&mut self.stage, seat, act.tiles[0])
            }
            ActionType::Tsumo if acts.contains(&act) => declare_self_win(&mut self.stage, seat),
            ActionType::Nop => self.discard_default(seat),
            _ => Err(GameError::NotOffered {
                seat,
                action: act.clone(),
            }),
        };

        // 不正な選択はツモ切り(ツモ牌がない場合は手牌の末尾)として処理
        let evs = match res {
            Ok(evs) => evs,
            Err(e) => {
                warn!("{}: {} not in {}", e, act, vec_to_string(&acts));
                self.discard_default(seat)?
            }
        };
        self.handle_events(evs);
        Ok(())
    }

    fn discard_default(&mut self, seat: Seat) -> Result<Vec<Event>, GameError> {
        let pl = &self.stage.players[seat];
        let t = match pl.drawn.or_else(|| pl.hand_tiles().pop()) {
            Some(t) => t,
            None => {
                return Err(GameError::NotOffered {
                    seat,
                    action: Action::nop(),
                })
            }
        };
        discard(&mut self.stage, seat, t)
    }

    fn do_call_operation(&mut self, discarder: Seat, tile: Tile) -> Result<(), GameError> {
        let offer = self.coordinator.offer_discard(&self.stage, discarder, tile)?;
        let seq = offer.seq;

        // 各プレイヤーのcall operationを非同期で決定するためのmini executor
        let mut pending = PendingSelections::new();
        for s in offer.seats_to_query() {
            pending.push(s, self.actors[s].select(&self.stage, seq, &offer.actions[s]));
        }

        let timeout = Duration::from_millis(self.rule.interrupt_timeout_ms);
        let deadline = Instant::now() + timeout;
        let mut cx = Context::from_waker(&self.waker);
        while !self.coordinator.is_complete() && !pending.is_empty() {
            for (s, act) in pending.poll_ready(&mut cx) {
                let resp = InterruptResponse::new(seq, s, act);
                if let Err(e) = self.coordinator.submit_response(&self.stage, resp) {
                    // 不正な応答はPassとして扱う
                    warn!("{}", e);
                    self.coordinator
                        .submit_response(&self.stage, InterruptResponse::pass(seq, s))?;
                }
            }
            if self.coordinator.is_complete() {
                break;
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            self.waiter.wait_timeout(deadline - now);
        }

        let resolution = if self.coordinator.is_complete() {
            self.coordinator.resolve()?
        } else {
            // アクションをまだ選択していないActorに失効通知を送る
            for s in pending.seats() {
                warn!("seat {} call action timed out (seq={})", s, seq);
                self.actors[s].expire(seq);
            }
            self.coordinator.expire()?
        };

        let evs = execute_claim(&mut self.stage, &resolution)?;
        self.handle_events(evs);
        Ok(())
    }
}

fn is_discardable(acts: &[Action], t: Tile) -> bool {
    acts.iter()
        .any(|a| a.ty == ActionType::Discard && a.tiles.contains(&t))
}
