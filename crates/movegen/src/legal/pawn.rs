//! Pawn pushes, captures, promotions and en passant.

use super::{Context, MoveList};
use crate::attacks::{bishop_attacks, pawn_attacks, pawn_double_push, pawn_push, rook_attacks};
use crate::Bitboard;
use movegen_core::{Color, Move, MoveFlag, Piece, Square};

/// Whether a pawn of `color` on `from` is placed to capture en passant onto `target`.
///
/// Purely geometric: `target` must be one of the pawn's diagonal capture
/// squares and the pawn must stand on its side's fifth rank. Whether an
/// enemy pawn actually sits behind `target` is not checked here.
pub fn can_capture_en_passant(from: Square, target: Square, color: Color) -> bool {
    from.rank() == color.en_passant_rank() && pawn_attacks(from, color).contains(target)
}

pub(super) fn generate(ctx: &Context<'_>, moves: &mut MoveList) {
    let empty = !ctx.occupied;
    let en_passant = ctx
        .board
        .state
        .en_passant
        .filter(|_| ctx.board.state.side_to_move == ctx.us);

    for from in ctx.board.pieces_of(Piece::Pawn, ctx.us) {
        let allowed = ctx.pins.allowed(from) & ctx.check_mask;

        let single = pawn_push(from, ctx.us) & empty;
        if single.is_not_empty() {
            for to in single & allowed {
                push_pawn_move(ctx, from, to, false, moves);
            }
            for to in pawn_double_push(from, ctx.us) & empty & allowed {
                moves.push(Move::new(from, to, MoveFlag::DoublePush));
            }
        }

        for to in pawn_attacks(from, ctx.us) & ctx.enemy & allowed {
            push_pawn_move(ctx, from, to, true, moves);
        }

        if let Some(target) = en_passant {
            if can_capture_en_passant(from, target, ctx.us) && en_passant_is_legal(ctx, from, target)
            {
                moves.push(Move::new(from, target, MoveFlag::EnPassant));
            }
        }
    }
}

/// Pushes a pawn move, expanding arrivals on the last rank into the four promotions.
#[inline]
fn push_pawn_move(ctx: &Context<'_>, from: Square, to: Square, capture: bool, moves: &mut MoveList) {
    if to.rank() == ctx.us.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::promotion(from, to, piece, capture));
        }
    } else if capture {
        moves.push(Move::capture(from, to));
    } else {
        moves.push(Move::quiet(from, to));
    }
}

/// En passant lifts two pawns off one rank at once, which the pin table
/// cannot see, so the king's lines are resolved again on the board as it
/// would look after the capture.
fn en_passant_is_legal(ctx: &Context<'_>, from: Square, target: Square) -> bool {
    let captured = Square::new(target.file(), from.rank());
    let victims = ctx.board.pieces_of(Piece::Pawn, ctx.them);
    if !victims.contains(captured) || ctx.occupied.contains(target) {
        return false;
    }
    // Under check the capture must either take the checker or block on the target.
    if !(ctx.check_mask.contains(target) || ctx.check_mask.contains(captured)) {
        return false;
    }
    if !ctx.pins.allowed(from).contains(target) {
        return false;
    }

    let after = (ctx.occupied.without(Bitboard::from_square(from) | captured.into())) | target.into();
    let queens = ctx.board.pieces_of(Piece::Queen, ctx.them);
    let lines = ctx.board.pieces_of(Piece::Rook, ctx.them) | queens;
    let diagonals = ctx.board.pieces_of(Piece::Bishop, ctx.them) | queens;
    (rook_attacks(ctx.king, after) & lines).is_empty()
        && (bishop_attacks(ctx.king, after) & diagonals).is_empty()
}
