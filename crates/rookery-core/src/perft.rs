//! Perft (performance test) for move generation correctness verification.

use tracing::trace;

use crate::position::Position;
use crate::side::Side;

/// Count the leaf nodes of the legal move tree `depth` plies deep, with `side`
/// moving first.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves (bulk counting: no make/unmake at the last ply).
pub fn perft(position: &mut Position, depth: usize, side: Side) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.generate_legal_moves(side);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in &moves {
        position.make_move(mv);
        nodes += perft(position, depth - 1, !side);
        position.unmake_move().expect("move was just made");
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(move, node_count)` pairs in coordinate notation, sorted
/// alphabetically. Depth 0 has no root moves to split by and returns an empty
/// list.
pub fn divide(position: &mut Position, depth: usize, side: Side) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = position.generate_legal_moves(side);
    let mut results: Vec<(String, u64)> = Vec::with_capacity(moves.len());
    for &mv in &moves {
        position.make_move(mv);
        let count = perft(position, depth - 1, !side);
        position.unmake_move().expect("move was just made");
        trace!(%mv, count, "divide");
        results.push((mv.to_string(), count));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
