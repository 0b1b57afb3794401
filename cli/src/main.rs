use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweeper_core::{CellCount, Coord, seeded_rng};
use tracing_subscriber::filter::LevelFilter;

use crate::{session::Session, settings::Settings};

mod command;
mod render;
mod session;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cells per side of the square board
    #[arg(long)]
    size: Option<Coord>,

    /// Number of mines to place
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// TOML file with `size`, `mines` and `seed`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final board as JSON when the session ends
    #[arg(long)]
    json: bool,
}

fn init_logging(filter: log::LevelFilter) {
    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let flags = Settings {
        size: args.size,
        mines: args.mines,
        seed: args.seed,
    };
    let settings = Settings::load(args.config.as_deref())?.merge(flags);
    let config = settings.game_config().context("invalid board settings")?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}");

    let mut session = Session::new(config, seeded_rng(seed)).context("generating the board")?;
    session.run(io::stdin().lock(), &mut io::stdout().lock())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.board())?);
    }
    Ok(())
}
