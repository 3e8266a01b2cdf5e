//! King steps and castling.

use super::{Context, MoveList};
use crate::attacks::{between, king_attacks};
use movegen_core::{CastleSide, File, Move, MoveFlag, Piece, Square};

pub(super) fn generate(ctx: &Context<'_>, moves: &mut MoveList) {
    let targets = king_attacks(ctx.king)
        .without(ctx.friendly)
        .without(ctx.enemy_attacks);
    ctx.push_targets(ctx.king, targets, moves);
}

/// Castling requires the right, both pieces on their home squares, an
/// empty gap between them, and a king that is not in check and never
/// crosses or lands on an attacked square.
pub(super) fn generate_castling(ctx: &Context<'_>, moves: &mut MoveList) {
    if ctx.checkers.is_not_empty() {
        return;
    }
    let rights = ctx.board.state.castling;
    if ctx.king != Square::new(File::E, ctx.us.home_rank()) {
        return;
    }
    let rooks = ctx.board.pieces_of(Piece::Rook, ctx.us);

    for side in CastleSide::ALL {
        if !rights.has(ctx.us, side) {
            continue;
        }
        let rook_home = side.rook_home(ctx.us);
        if !rooks.contains(rook_home) {
            continue;
        }
        if (between(ctx.king, rook_home) & ctx.occupied).is_not_empty() {
            continue;
        }
        let transit = side.king_transit(ctx.us);
        let landing = side.king_target(ctx.us);
        if ctx.enemy_attacks.contains(transit) || ctx.enemy_attacks.contains(landing) {
            continue;
        }
        let flag = match side {
            CastleSide::Kingside => MoveFlag::CastleKingside,
            CastleSide::Queenside => MoveFlag::CastleQueenside,
        };
        moves.push(Move::new(ctx.king, landing, flag));
    }
}
