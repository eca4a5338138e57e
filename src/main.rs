#![warn(rust_2018_idioms)]

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use flower_mahjong::app::{CalculatorApp, EngineApp, EngineArgs};

#[derive(Parser)]
#[command(name = "flower_mahjong")]
#[command(about = "Four-seat flower mahjong rule engine")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Run a game between bots
    Engine(EngineArgs),
    /// Analyze and score a hand expression
    Calc {
        /// e.g. "m111222333w111d11 /p777 seat=1 prevailing=1 flowers=b1r1 tsumo"
        exp: String,
        /// Print debug info
        #[arg(short, long)]
        detail: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOGが優先, 未設定ならinfo (engine -qの場合はwarn)
    let default = match &cli.mode {
        Mode::Engine(args) if args.quiet => "warn",
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let res = match cli.mode {
        Mode::Engine(args) => EngineApp::new(args).and_then(|app| app.run()),
        Mode::Calc { exp, detail } => CalculatorApp::new(&exp, detail).run(),
    };
    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(1);
    }
}
