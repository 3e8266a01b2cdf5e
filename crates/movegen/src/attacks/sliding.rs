//! Occupancy-aware attacks for rooks, bishops and queens.
//!
//! Each ray is cut at its first blocker: the blocker itself stays in the
//! attack set (it may be a capture) and everything behind it is dropped.
//! Nothing here knows about colors or legality.

use super::tables::{ray, Direction};
use crate::Bitboard;
use movegen_core::Square;

/// Attacks from `sq` along a single direction, stopping at the first occupied square.
#[inline]
pub fn ray_attacks(sq: Square, direction: Direction, occupied: Bitboard) -> Bitboard {
    let full = ray(sq, direction);
    match direction.nearest(full & occupied) {
        Some(blocker) => full.without(ray(blocker, direction)),
        None => full,
    }
}

#[inline]
fn union_of(sq: Square, directions: &[Direction], occupied: Bitboard) -> Bitboard {
    directions
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    union_of(sq, &Direction::ORTHOGONAL, occupied)
}

#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    union_of(sq, &Direction::DIAGONAL, occupied)
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}
