use super::*;

pub struct TsumogiriBuilder;

impl ActorBuilder for TsumogiriBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Tsumogiri".to_string(),
            args: vec![Arg::bool("win", true)],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Tsumogiri::from_config(config))
    }
}

// ツモ牌をそのまま捨てるBot
// winがtrueの場合はツモ和了・ロンが可能なら和了する
#[derive(Clone)]
pub struct Tsumogiri {
    config: Config,
    seat: Seat,
    win: bool,
}

impl Tsumogiri {
    pub fn from_config(config: Config) -> Self {
        let win = config.args[0].value.as_bool().unwrap_or(true);
        Self {
            config,
            seat: NO_SEAT,
            win,
        }
    }
}

impl Actor for Tsumogiri {
    fn init(&mut self, seat: Seat) {
        self.seat = seat;
    }

    fn select(&mut self, stg: &Stage, _seq: u64, acts: &[Action]) -> ActionFuture {
        if self.win {
            for act in acts {
                if matches!(act.ty, ActionType::Tsumo | ActionType::Ron) {
                    return ready(act.clone());
                }
            }
        }

        // 鳴き後はツモ牌がないので手牌の末尾を打牌
        let is_turn = acts.iter().any(|a| a.ty == ActionType::Discard);
        if is_turn && stg.players[self.seat].drawn.is_none() {
            if let Some(t) = acts
                .iter()
                .find(|a| a.ty == ActionType::Discard)
                .and_then(|a| a.tiles.last())
            {
                return ready(Action::discard(*t));
            }
        }

        ready(Action::nop())
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Tsumogiri {}
