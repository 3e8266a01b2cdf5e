//! Attack generation: geometric tables, sliding resolution and whole-side
//! attack maps.

pub mod sliding;
pub mod tables;

pub use sliding::{bishop_attacks, queen_attacks, ray_attacks, rook_attacks};
pub use tables::{
    between, king_attacks, knight_attacks, pawn_attacks, pawn_double_push, pawn_push, ray,
    BlockerOrder, Direction, RayClass,
};

use crate::{Bitboard, Board};
use movegen_core::{Color, Piece, Square};

/// Every square attacked by a piece of `by`, with sliders resolved
/// against `occupied` rather than the board's own occupancy.
///
/// Passing an occupancy with the defending king removed lets the king's
/// own square stop shadowing slider rays, so squares behind it along a
/// checking line count as attacked.
pub fn attacked_squares(board: &Board, by: Color, occupied: Bitboard) -> Bitboard {
    let mut attacked = Bitboard::EMPTY;

    for sq in board.pieces_of(Piece::Pawn, by) {
        attacked |= pawn_attacks(sq, by);
    }
    for sq in board.pieces_of(Piece::Knight, by) {
        attacked |= knight_attacks(sq);
    }
    for sq in board.pieces_of(Piece::King, by) {
        attacked |= king_attacks(sq);
    }

    let queens = board.pieces_of(Piece::Queen, by);
    for sq in board.pieces_of(Piece::Bishop, by) | queens {
        attacked |= bishop_attacks(sq, occupied);
    }
    for sq in board.pieces_of(Piece::Rook, by) | queens {
        attacked |= rook_attacks(sq, occupied);
    }

    attacked
}

/// Whether any piece of `by` attacks `sq` on the board as it stands.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let occupied = board.occupied();
    let queens = board.pieces_of(Piece::Queen, by);

    (pawn_attacks(sq, by.opposite()) & board.pieces_of(Piece::Pawn, by)).is_not_empty()
        || (knight_attacks(sq) & board.pieces_of(Piece::Knight, by)).is_not_empty()
        || (king_attacks(sq) & board.pieces_of(Piece::King, by)).is_not_empty()
        || (bishop_attacks(sq, occupied) & (board.pieces_of(Piece::Bishop, by) | queens))
            .is_not_empty()
        || (rook_attacks(sq, occupied) & (board.pieces_of(Piece::Rook, by) | queens))
            .is_not_empty()
}
