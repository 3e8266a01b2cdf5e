//! Legal move generation.
//!
//! Legality is decided up front instead of by make-and-test: the king's
//! checkers give a mask of squares that resolve check, pins restrict each
//! pinned piece to its line, and the king is kept off squares in the enemy
//! attack map. Each piece generator then only intersects bitboards.

mod king;
mod knight;
mod pawn;
mod sliders;

pub use pawn::can_capture_en_passant;

use crate::attacks::attacked_squares;
use crate::check::{check_mask, checkers};
use crate::pins::{detect_pins, PinResult};
use crate::{Bitboard, Board, BoardError};
use movegen_core::{Color, Move, Piece, Square};

/// A list of moves with fixed capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub const MAX_MOVES: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Everything the piece generators share for one call.
pub(crate) struct Context<'a> {
    pub board: &'a Board,
    pub us: Color,
    pub them: Color,
    pub king: Square,
    pub occupied: Bitboard,
    pub friendly: Bitboard,
    pub enemy: Bitboard,
    pub checkers: Bitboard,
    pub check_mask: Bitboard,
    pub pins: PinResult,
    /// Enemy attacks with our king lifted off the board.
    pub enemy_attacks: Bitboard,
}

impl<'a> Context<'a> {
    fn new(board: &'a Board, us: Color) -> Result<Self, BoardError> {
        let king = board.king_square(us)?;
        let them = us.opposite();
        let occupied = board.occupied();
        let found = checkers(board, king, them);
        Ok(Context {
            board,
            us,
            them,
            king,
            occupied,
            friendly: board.friendly(us),
            enemy: board.enemy(us),
            checkers: found,
            check_mask: check_mask(board, king, found),
            pins: detect_pins(board, king, us),
            enemy_attacks: attacked_squares(board, them, occupied.without(king.into())),
        })
    }

    /// Pushes `from -> to` for every square in `targets`, flagged as a
    /// capture when an enemy piece stands there.
    #[inline]
    fn push_targets(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        for to in targets {
            if self.enemy.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

/// Generates every legal move for `side`.
///
/// Moves come out grouped by piece: king, castling, knights, bishops,
/// rooks, queens, then pawns. In double check only king moves are
/// produced. Fails only when `side` does not have exactly one king.
pub fn generate_legal_moves(board: &Board, side: Color) -> Result<MoveList, BoardError> {
    let ctx = Context::new(board, side)?;
    let mut moves = MoveList::new();

    king::generate(&ctx, &mut moves);
    king::generate_castling(&ctx, &mut moves);

    if ctx.checkers.more_than_one() {
        return Ok(moves);
    }

    knight::generate(&ctx, &mut moves);
    sliders::generate(&ctx, Piece::Bishop, &mut moves);
    sliders::generate(&ctx, Piece::Rook, &mut moves);
    sliders::generate(&ctx, Piece::Queen, &mut moves);
    pawn::generate(&ctx, &mut moves);

    Ok(moves)
}
