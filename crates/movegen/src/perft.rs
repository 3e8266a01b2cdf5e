//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth.
//! The counts for well-known positions are published, so any mismatch
//! points at a generation or execution bug.

use tracing::debug;

use crate::{Position, PositionError};

/// Counts the leaf nodes `depth` plies below `position`.
///
/// The tree is walked with apply/revert on the one position, which is
/// left as it was found. The last ply is bulk-counted from the move list.
pub fn perft(position: &mut Position, depth: u32) -> Result<u64, PositionError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = position.legal_moves()?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for &mv in &moves {
        position.apply_move(mv)?;
        let below = perft(position, depth - 1);
        position.revert_move();
        nodes += below?;
    }
    Ok(nodes)
}

/// Perft split by root move, sorted by move notation.
///
/// Comparing each entry against a reference engine narrows a wrong total
/// down to the subtree that causes it.
pub fn perft_divide(position: &mut Position, depth: u32) -> Result<Vec<(String, u64)>, PositionError> {
    let moves = position.legal_moves()?;
    let mut results = Vec::with_capacity(moves.len());

    for &mv in &moves {
        position.apply_move(mv)?;
        let nodes = perft(position, depth.saturating_sub(1));
        position.revert_move();
        let nodes = nodes?;
        debug!(mv = %mv, nodes, "divide");
        results.push((mv.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
