use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use rookery_core::{Position, STARTING_FEN, build_tables, divide};
use tracing::info;

const DEFAULT_DEPTH: usize = 4;

/// Usage: `rookery [depth] [fen...]`
///
/// Prints a perft divide of the given position (the start position by
/// default) followed by the node total.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let depth = match args.next() {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid depth {arg:?}"))?,
        None => DEFAULT_DEPTH,
    };
    ensure!(depth > 0, "depth must be at least 1 to divide by root move");
    let fen_args: Vec<String> = args.collect();
    let fen = if fen_args.is_empty() {
        STARTING_FEN.to_string()
    } else {
        fen_args.join(" ")
    };

    let started = Instant::now();
    let tables = Arc::new(build_tables().context("attack tables are corrupt")?);
    info!(elapsed = ?started.elapsed(), "attack tables ready");

    let mut position =
        Position::from_fen(tables, &fen).with_context(|| format!("invalid FEN {fen:?}"))?;
    info!(%fen, depth, "rookery perft");

    let started = Instant::now();
    let side = position.side_to_move();
    let results = divide(&mut position, depth, side);
    let elapsed = started.elapsed();

    let mut total = 0u64;
    for (mv, nodes) in &results {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    println!();
    println!("Nodes searched: {total}");

    let nps = total as f64 / elapsed.as_secs_f64().max(1e-9);
    info!(total, moves = results.len(), ?elapsed, nps = nps as u64, "perft finished");
    Ok(())
}
