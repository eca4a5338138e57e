use tracing::{debug, info};

use crate::control::listener::Listener;
use crate::model::*;
use crate::util::misc::vec_to_string;

// [EventPrinter]
// 局の開始・終了は卓全体,それ以外は1行ずつログに出力
#[derive(Debug, Default)]
pub struct EventPrinter {}

impl EventPrinter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &Stage, event: &Event) {
        match event {
            Event::New(e) => {
                info!(
                    "(step:{}) New round={} prevailing_wind={} dealer={}",
                    stg.step, e.round, e.prevailing_wind, e.dealer
                );
                debug!("\n{}", stg);
            }
            Event::Deal(e) => {
                let rep = if e.is_replacement { " (replacement)" } else { "" };
                debug!("(step:{}) Deal seat={} {}{}", stg.step, e.seat, e.tile, rep);
            }
            Event::Flower(e) => {
                debug!("(step:{}) Flower seat={} {}", stg.step, e.seat, e.tile);
            }
            Event::Discard(e) => {
                debug!(
                    "(step:{}) Discard seat={} {}{}",
                    stg.step,
                    e.seat,
                    e.tile,
                    if e.is_drawn { " *" } else { "" },
                );
            }
            Event::Meld(e) => {
                info!(
                    "(step:{}) Meld seat={} {:?} {} from={:?}",
                    stg.step,
                    e.seat,
                    e.meld_type,
                    vec_to_string(&e.tiles),
                    e.from,
                );
            }
            Event::Win(e) => {
                let ctx = &e.context;
                info!(
                    "(step:{}) Win seat={} from={:?} {:?} {} {}",
                    stg.step,
                    ctx.seat,
                    ctx.from,
                    ctx.shape,
                    vec_to_string(&ctx.hand),
                    ctx.score,
                );
                info!("scores: {:?}", e.scores);
                debug!("\n{}", stg);
            }
            Event::Draw(_) => {
                info!("(step:{}) Draw", stg.step);
                debug!("\n{}", stg);
            }
        }
    }
}
