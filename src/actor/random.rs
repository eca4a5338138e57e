use rand::prelude::*;

use super::*;

pub struct RandomDiscardBuilder;

impl ActorBuilder for RandomDiscardBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "RandomDiscard".to_string(),
            args: vec![Arg::bool("call", false), Arg::int("seed", 0)],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(RandomDiscard::from_config(config))
    }
}

// 打牌可能な牌からランダムに打牌するBot
// callがtrueの場合は提示された鳴きからもランダムに選択する
#[derive(Clone)]
pub struct RandomDiscard {
    config: Config,
    rng: StdRng,
    call: bool,
}

impl RandomDiscard {
    pub fn from_config(config: Config) -> Self {
        let call = config.args[0].value.as_bool().unwrap_or(false);
        let seed = config.args[1].value.as_int().unwrap_or(0);
        Self {
            config,
            rng: StdRng::seed_from_u64(seed as u64),
            call,
        }
    }
}

impl Actor for RandomDiscard {
    fn select(&mut self, _stg: &Stage, _seq: u64, acts: &[Action]) -> ActionFuture {
        // 和了は常に選択
        for act in acts {
            if matches!(act.ty, ActionType::Tsumo | ActionType::Ron) {
                return ready(act.clone());
            }
        }

        if let Some(a) = acts.iter().find(|a| a.ty == ActionType::Discard) {
            if let Some(&t) = a.tiles.choose(&mut self.rng) {
                return ready(Action::discard(t));
            }
        }

        if self.call {
            if let Some(act) = acts.choose(&mut self.rng) {
                return ready(act.clone());
            }
        }

        ready(Action::nop())
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for RandomDiscard {}
