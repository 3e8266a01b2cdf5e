//! Perft driver - counts legal move tree leaves to validate the generator.

mod suite;

use anyhow::Context;
use clap::Parser;
use movegen::{perft, perft_divide, Position};
use movegen_core::Fen;
use std::path::{Path, PathBuf};
use std::time::Instant;
use suite::Suite;
use tracing::{info, Level};

/// Perft driver for the bitboard move generator.
#[derive(Parser)]
#[command(name = "perft")]
#[command(about = "Counts legal move tree leaves to validate the move generator")]
struct Args {
    /// Position to count from, in FEN
    #[arg(long, default_value = Fen::STARTPOS)]
    fen: String,

    /// Depth in plies
    #[arg(long, short, default_value = "5")]
    depth: u32,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Moves in coordinate notation (e.g. e2e4) played before counting
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Run every position of a TOML suite file instead of a single count
    #[arg(long, conflicts_with_all = ["fen", "depth", "divide", "moves"])]
    suite: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match &args.suite {
        Some(path) => run_suite(path),
        None => run_single(&args),
    }
}

fn run_single(args: &Args) -> anyhow::Result<()> {
    let mut position = Position::from_fen(&args.fen)?;
    for notation in &args.moves {
        position
            .play(notation)
            .with_context(|| format!("cannot play {notation}"))?;
    }
    info!(fen = %position.to_fen(), depth = args.depth, "counting");

    let start = Instant::now();
    let nodes: u64 = if args.divide {
        let divide = perft_divide(&mut position, args.depth)?;
        for (mv, count) in &divide {
            println!("{mv}: {count}");
        }
        println!();
        divide.iter().map(|(_, count)| count).sum()
    } else {
        perft(&mut position, args.depth)?
    };
    let elapsed = start.elapsed();

    println!("Nodes searched: {nodes}");
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        nps = (nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64,
        "done"
    );
    Ok(())
}

fn run_suite(path: &Path) -> anyhow::Result<()> {
    let suite = Suite::load(path).with_context(|| format!("loading {}", path.display()))?;
    info!(path = %path.display(), positions = suite.positions.len(), "running suite");

    let outcomes = suite.run()?;
    for outcome in &outcomes {
        let status = if outcome.passed() { "ok" } else { "FAIL" };
        println!(
            "{status:<4} {name}: depth {depth}, expected {expected}, found {found} ({ms} ms)",
            name = outcome.entry.name,
            depth = outcome.entry.depth,
            expected = outcome.entry.nodes,
            found = outcome.found,
            ms = outcome.elapsed.as_millis(),
        );
    }
    suite::verify(&outcomes)?;
    Ok(())
}
