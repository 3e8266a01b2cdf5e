use super::{Context, MoveList};
use crate::attacks::knight_attacks;
use movegen_core::Piece;

/// A pinned knight can never stay on its pin line, so it has no moves.
pub(super) fn generate(ctx: &Context<'_>, moves: &mut MoveList) {
    let knights = ctx
        .board
        .pieces_of(Piece::Knight, ctx.us)
        .without(ctx.pins.pinned);
    for from in knights {
        let targets = knight_attacks(from).without(ctx.friendly) & ctx.check_mask;
        ctx.push_targets(from, targets, moves);
    }
}
