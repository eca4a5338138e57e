use rand::prelude::*;
use tracing::info;

use super::common::*;
use super::turn::replace_dealt_flowers;
use super::wall::{create_wall, HAND_SIZE};
use crate::error::GameError;
use crate::model::*;

// 和了後の席順の変化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Retained,     // 親の据え置き
    Rotated,      // 親の交代
    WindAdvanced, // 親の交代に加えて場風が進む
}

// 局をまたいで保持する卓の状態
#[derive(Debug)]
pub struct RoundManager {
    rng: StdRng,
    initial_dealer: Seat,
    dealer: Seat,
    prevailing_wind: Tnum,
    retention: usize,
    retention_limit: usize,
    round: usize,
    scores: [Point; SEAT],
}

impl RoundManager {
    pub fn new(seed: u64, initial_dealer: Seat, retention_limit: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            initial_dealer,
            dealer: initial_dealer,
            prevailing_wind: WE,
            retention: 0,
            retention_limit,
            round: 0,
            scores: [0; SEAT],
        }
    }

    #[inline]
    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    #[inline]
    pub fn prevailing_wind(&self) -> Tnum {
        self.prevailing_wind
    }

    #[inline]
    pub fn retention(&self) -> usize {
        self.retention
    }

    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    #[inline]
    pub fn scores(&self) -> [Point; SEAT] {
        self.scores
    }

    // 局終了時の累計得点を引き継ぐ
    pub fn update_scores(&mut self, scores: [Point; SEAT]) {
        self.scores = scores;
    }

    pub fn start_round(&mut self) -> Result<(Stage, Vec<Event>), GameError> {
        let wall = create_wall(self.rng.next_u64());
        self.start_round_with_wall(wall)
    }

    // 牌山の先頭から座席順に13枚ずつ配牌
    // 配牌に含まれる花牌は親から順に末尾の牌と交換
    // 配牌に足りない牌山はエラー
    pub fn start_round_with_wall(
        &mut self,
        wall: Vec<Tile>,
    ) -> Result<(Stage, Vec<Event>), GameError> {
        let need = HAND_SIZE * SEAT;
        if wall.len() < need {
            return Err(GameError::ShortWall {
                count: wall.len(),
                need,
            });
        }

        let mut stg = Stage {
            round: self.round,
            prevailing_wind: self.prevailing_wind,
            dealer: self.dealer,
            retention: self.retention,
            wall: wall.into(),
            ..Default::default()
        };

        for s in 0..SEAT {
            let pl = &mut stg.players[s];
            pl.seat = s;
            pl.score = self.scores[s];
            let tiles: Vec<Tile> = stg.wall.drain(..HAND_SIZE).collect();
            pl.hand = tiles_to_tile_table(&tiles);
        }

        let hands = std::array::from_fn(|s| stg.players[s].hand_tiles());
        let mut evs = vec![Event::new(
            stg.round,
            stg.prevailing_wind,
            stg.dealer,
            hands,
            stg.wall_count(),
        )];
        for i in 0..SEAT {
            replace_dealt_flowers(&mut stg, (self.dealer + i) % SEAT, &mut evs);
        }

        stg.phase = Phase::AwaitingDraw(self.dealer);
        info!(
            "round {} start: prevailing_wind={}, dealer={}, retention={}",
            self.round, self.prevailing_wind, self.dealer, self.retention,
        );
        Ok((stg, evs))
    }

    // 和了後の席順の決定
    // 場風の席の和了は据え置き(上限に達したら交代), それ以外は即交代
    pub fn handle_win(&mut self, seat: Seat) -> Rotation {
        self.round += 1;
        if calc_seat_wind(self.dealer, seat) == self.prevailing_wind {
            self.retention += 1;
            if self.retention < self.retention_limit {
                info!("seat {} retained ({})", seat, self.retention);
                return Rotation::Retained;
            }
        }
        self.rotate()
    }

    // 流局: 席順,連続回数ともに変化なし
    pub fn handle_draw(&mut self) -> Rotation {
        self.round += 1;
        Rotation::Retained
    }

    fn rotate(&mut self) -> Rotation {
        self.retention = 0;
        self.dealer = next_seat(self.dealer);
        if self.dealer == self.initial_dealer {
            self.prevailing_wind = next_wind(self.prevailing_wind);
            info!("prevailing wind advanced to {}", self.prevailing_wind);
            Rotation::WindAdvanced
        } else {
            info!("dealer rotated to seat {}", self.dealer);
            Rotation::Rotated
        }
    }
}
