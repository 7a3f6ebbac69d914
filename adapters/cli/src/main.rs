#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Redistrict levels from move scripts.

mod level_file;
mod script;
mod session;
mod text;

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use redistrict_presentation::Presenter;
use redistrict_system_progress::{self as progress, Progress};
use redistrict_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    session::Session,
    text::{LogAudio, TextPresenter},
};

/// Redistrict: swap tiles until Death holds a majority of the districts.
#[derive(Parser, Debug)]
#[command(name = "redistrict", author, version, about, long_about = None)]
struct Args {
    /// Log every swap and conversion.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a level with a scripted sequence of moves.
    Play {
        /// Level file (TOML).
        #[arg(short, long)]
        level: PathBuf,

        /// Moves: U, D, L, R arrows, Z undo, X reset.
        #[arg(short, long, default_value = "")]
        moves: String,

        /// Player progress file (JSON); created when missing.
        #[arg(short, long)]
        progress: Option<PathBuf>,

        /// Extend the swap limit by half and remember the choice.
        #[arg(long)]
        extra_swaps: bool,
    },

    /// Validate a level file and print a summary.
    Check {
        /// Level file (TOML).
        #[arg(short, long)]
        level: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Entry point for the Redistrict command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Play {
            level,
            moves,
            progress,
            extra_swaps,
        } => play(&level, &moves, progress, extra_swaps),
        Commands::Check { level } => check(&level),
    }
}

fn check(path: &Path) -> Result<()> {
    let level = level_file::load_level(path)?;
    let limit = level
        .swap_limit
        .map_or_else(|| "none".to_owned(), |limit| limit.to_string());
    println!(
        "{}: {}x{} board, {} tiles in {} districts, {} obstacles, swap limit {limit}",
        level.name,
        level.columns,
        level.rows,
        level.tile_count(),
        level.districts.len(),
        level.obstacles.len(),
    );
    Ok(())
}

fn play(
    path: &Path,
    moves: &str,
    progress_path: Option<PathBuf>,
    extra_swaps: bool,
) -> Result<()> {
    let steps = script::parse(moves).context("invalid move script")?;
    let level = level_file::load_level(path)?;

    let record = match &progress_path {
        Some(path) => progress::load(path)
            .with_context(|| format!("failed to load progress from {}", path.display()))?,
        None => progress::PlayerProgress::default(),
    };
    let mut player = Progress::new(record);
    if extra_swaps {
        player.set_extra_swaps(true);
    }

    let mut session = Session::start(level, player)?;
    let mut presenter = TextPresenter::new(io::stdout().lock());
    let mut audio = LogAudio;

    for step in steps {
        session.play(step.input(), &mut presenter, &mut audio)?;
    }
    session.settle(&mut presenter, &mut audio, true)?;
    presenter.present(&session.scene())?;

    let status = query::board_status(session.world());
    info!(
        won = status.won,
        swaps_made = status.swaps_made,
        level = session.progress().record().current_level,
        "session_finished"
    );

    if let Some(path) = progress_path {
        if session.progress().is_dirty() {
            session
                .progress_mut()
                .save(&path)
                .with_context(|| format!("failed to save progress to {}", path.display()))?;
        }
    }
    Ok(())
}
