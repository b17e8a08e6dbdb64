use anyhow::Result;
use clap::Parser;
use marblebag_game::{Engine, derive_stream_seed};
use marblebag_term::{Shell, ShellOptions};
use rand::RngCore;
use rand::rngs::OsRng;
use std::io::{stdin, stdout};

const EFFECTS_STREAM_TAG: &[u8] = b"marblebag.effects";

#[derive(Debug, Parser)]
#[command(name = "marblebag", version)]
#[command(about = "Bet gold on draws from a bag of colored marbles")]
struct Args {
    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| OsRng.next_u64());
    if args.seed.is_some() {
        log::info!("using fixed seed {seed}");
    }
    let options = ShellOptions {
        color: !args.no_color,
        effects_seed: derive_stream_seed(seed, EFFECTS_STREAM_TAG),
    };

    let mut shell = Shell::new(Engine::seeded(seed), stdout().lock(), options);
    shell.run(stdin().lock())
}
