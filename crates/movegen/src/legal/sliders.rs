use super::{Context, MoveList};
use crate::attacks::{bishop_attacks, queen_attacks, rook_attacks};
use movegen_core::Piece;

/// Moves for every `piece` of the side to move; `piece` is one of the
/// three sliders.
pub(super) fn generate(ctx: &Context<'_>, piece: Piece, moves: &mut MoveList) {
    for from in ctx.board.pieces_of(piece, ctx.us) {
        let reach = match piece {
            Piece::Bishop => bishop_attacks(from, ctx.occupied),
            Piece::Rook => rook_attacks(from, ctx.occupied),
            Piece::Queen => queen_attacks(from, ctx.occupied),
            Piece::Pawn | Piece::Knight | Piece::King => continue,
        };
        let targets = reach.without(ctx.friendly) & ctx.check_mask & ctx.pins.allowed(from);
        ctx.push_targets(from, targets, moves);
    }
}
