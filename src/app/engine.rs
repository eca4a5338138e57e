use std::path::PathBuf;

use clap::Args;
use rand::prelude::*;
use tracing::info;

use crate::actor::create_actor;
use crate::control::actor::{Actor, ActorClone};
use crate::control::{engine::MahjongEngine, listener::Listener};
use crate::listener::*;
use crate::model::*;
use crate::util::misc::*;

#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Random seed (unix time if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of rounds per game (overrides the rule file)
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Rule file (JSON)
    #[arg(long)]
    pub rule: Option<PathBuf>,

    /// Number of games. Seats are shuffled every game when more than one
    #[arg(short, long, default_value_t = 1)]
    pub games: u32,

    /// Actor of seat 0
    #[arg(short = '0', default_value = "Tsumogiri")]
    pub actor0: String,

    /// Actor of seat 1
    #[arg(short = '1', default_value = "Tsumogiri")]
    pub actor1: String,

    /// Actor of seat 2
    #[arg(short = '2', default_value = "Tsumogiri")]
    pub actor2: String,

    /// Actor of seat 3
    #[arg(short = '3', default_value = "Tsumogiri")]
    pub actor3: String,

    /// Write event logs of each round under DIR
    #[arg(short, long, value_name = "DIR")]
    pub write: Option<String>,

    /// Do not print events
    #[arg(short, long)]
    pub quiet: bool,
}

// [EngineApp]
// bot同士の対局シミュレーション
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    rule: Rule,
    n_game: u32,
    write: Option<String>,
    quiet: bool,
    names: [String; SEAT], // actor names
}

impl EngineApp {
    pub fn new(args: EngineArgs) -> Res<Self> {
        let mut rule = match &args.rule {
            Some(path) => Rule::from_file(path)?,
            None => Rule::default(),
        };
        if let Some(n) = args.rounds {
            rule.n_round = n;
        }

        let seed = args.seed.unwrap_or_else(|| {
            let seed = unixtime_now();
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                seed
            );
            seed
        });

        Ok(Self {
            seed,
            rule,
            n_game: args.games.max(1),
            write: args.write,
            quiet: args.quiet,
            names: [args.actor0, args.actor1, args.actor2, args.actor3],
        })
    }

    pub fn run(self) -> Res {
        println!("seed: {}", self.seed);

        let mut actors = vec![];
        for name in &self.names {
            actors.push(create_actor(name)?);
        }
        let actors: [Box<dyn Actor>; SEAT] = actors
            .try_into()
            .map_err(|_| "actor count must be 4")?;
        for s in 0..SEAT {
            println!("actor{}: {:?}", s, actors[s]);
        }
        println!();

        let start = std::time::Instant::now();
        if self.n_game == 1 {
            self.run_single_game(actors)?;
        } else {
            self.run_multiple_game(actors)?;
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn run_single_game(&self, actors: [Box<dyn Actor>; SEAT]) -> Res {
        let mut listeners: Vec<Box<dyn Listener>> = vec![];
        if !self.quiet {
            listeners.push(Box::new(EventPrinter::new()));
        }
        if let Some(dir) = &self.write {
            listeners.push(Box::new(EventWriter::new(dir)));
        }

        let mut game = MahjongEngine::new(self.seed, self.rule.clone(), actors, listeners);
        let scores = game.run()?;
        for s in 0..SEAT {
            println!("seat{}: {:4}", s, scores[s]);
        }
        Ok(())
    }

    // 座席をシャッフルしながら複数回対局して,Actor毎の平均得点を表示
    fn run_multiple_game(&self, actors: [Box<dyn Actor>; SEAT]) -> Res {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut sum_scores = [0; SEAT];
        for i in 0..self.n_game {
            let seed = rng.next_u64();
            let mut shuffle = [0, 1, 2, 3];
            shuffle.shuffle(&mut rng);
            let shuffled: [Box<dyn Actor>; SEAT] =
                std::array::from_fn(|s| actors[shuffle[s]].clone_box());

            let start = std::time::Instant::now();
            let mut game = MahjongEngine::new(seed, self.rule.clone(), shuffled, vec![]);
            let scores = game.run()?;

            print!(
                "{:5},{:4}ms,{:20}",
                i,
                start.elapsed().as_millis(),
                game.get_seed()
            );
            for s in 0..SEAT {
                let a = shuffle[s];
                sum_scores[a] += scores[s];
                print!(", ac{}:{:4}", a, scores[s]);
            }
            println!();
        }

        for a in 0..SEAT {
            println!(
                "ac{} avg_score: {:6.2}",
                a,
                sum_scores[a] as f64 / self.n_game as f64
            );
        }
        Ok(())
    }
}
