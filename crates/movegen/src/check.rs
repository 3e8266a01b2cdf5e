//! Check detection and the check-resolution mask.

use crate::attacks::{
    between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, ray, rook_attacks,
    Direction,
};
use crate::{Bitboard, Board};
use movegen_core::{Color, Piece, Square};

/// Pieces of `attacker` currently giving check to the king on `king`.
///
/// Sliders are first narrowed to those standing on one of the king's rays
/// of the matching geometry, then confirmed by resolving their own attacks
/// against the real occupancy.
pub fn checkers(board: &Board, king: Square, attacker: Color) -> Bitboard {
    let defender = attacker.opposite();
    let mut found = (knight_attacks(king) & board.pieces_of(Piece::Knight, attacker))
        | (pawn_attacks(king, defender) & board.pieces_of(Piece::Pawn, attacker))
        | (king_attacks(king) & board.pieces_of(Piece::King, attacker));

    let occupied = board.occupied();
    let queens = board.pieces_of(Piece::Queen, attacker);

    let diagonal_lines = Direction::DIAGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray(king, dir));
    for sq in (board.pieces_of(Piece::Bishop, attacker) | queens) & diagonal_lines {
        if bishop_attacks(sq, occupied).contains(king) {
            found.set(sq);
        }
    }

    let orthogonal_lines = Direction::ORTHOGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray(king, dir));
    for sq in (board.pieces_of(Piece::Rook, attacker) | queens) & orthogonal_lines {
        if rook_attacks(sq, occupied).contains(king) {
            found.set(sq);
        }
    }

    found
}

/// Squares a non-king move must land on to resolve the current check.
///
/// Not in check: every square. Double check: none, only the king can
/// move. A single contact checker must be captured; a single slider may
/// also be blocked on any square between it and the king.
pub fn check_mask(board: &Board, king: Square, checkers: Bitboard) -> Bitboard {
    if checkers.is_empty() {
        return Bitboard::FULL;
    }
    if checkers.more_than_one() {
        return Bitboard::EMPTY;
    }
    let Some(checker) = checkers.lsb() else {
        return Bitboard::FULL;
    };
    let slides = board
        .piece_at(checker)
        .is_some_and(|piece| piece.piece.is_slider());
    if slides {
        between(checker, king) | checkers
    } else {
        checkers
    }
}
