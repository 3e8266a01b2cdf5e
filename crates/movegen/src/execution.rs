//! Moves as lists of reversible board edits.
//!
//! A [`MoveExecution`] is built once from the board it will be applied to.
//! Applying it runs its effects in order; reverting runs the inverse of each
//! effect in reverse order, which restores the board exactly.

use movegen_core::{CastleSide, Color, ColoredPiece, Move, MoveFlag, Piece, Square};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{Board, BoardState};

/// Errors raised when a move does not fit the board it is built against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),

    #[error("piece on {square} belongs to {color}, who is not to move")]
    NotSideToMove { square: Square, color: Color },

    #[error("target square {0} holds a piece of the moving side")]
    BlockedTarget(Square),

    #[error("no pawn to capture en passant on {0}")]
    MissingEnPassantPawn(Square),

    #[error("no rook on {0} to castle with")]
    MissingCastlingRook(Square),
}

/// One atomic, invertible change to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEffect {
    Place { square: Square, piece: ColoredPiece },
    Remove { square: Square, piece: ColoredPiece },
    Transition { prev: BoardState, next: BoardState },
}

impl MoveEffect {
    #[inline]
    pub fn apply(&self, board: &mut Board) {
        match *self {
            MoveEffect::Place { square, piece } => board.put_piece(square, piece),
            MoveEffect::Remove { square, piece } => board.remove_piece(square, piece),
            MoveEffect::Transition { next, .. } => board.state = next,
        }
    }

    #[inline]
    pub fn revert(&self, board: &mut Board) {
        match *self {
            MoveEffect::Place { square, piece } => board.remove_piece(square, piece),
            MoveEffect::Remove { square, piece } => board.put_piece(square, piece),
            MoveEffect::Transition { prev, .. } => board.state = prev,
        }
    }
}

/// The worst case is castling: mover out, king in, rook out, rook in,
/// state. A capturing promotion needs only four.
const MAX_EFFECTS: usize = 6;

/// A move broken down into the effects that perform it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveExecution {
    mv: Move,
    effects: SmallVec<[MoveEffect; MAX_EFFECTS]>,
}

impl MoveExecution {
    /// Derives the effects of `mv` on `board`.
    ///
    /// Captures are read off the board rather than the move flag, so a
    /// flagless coordinate move still removes what stands on its target.
    /// En passant and castling are recognised by their flags.
    pub fn build(board: &Board, mv: Move) -> Result<Self, ExecutionError> {
        let from = mv.from();
        let to = mv.to();
        let mover = board
            .piece_at(from)
            .ok_or(ExecutionError::EmptyOrigin(from))?;
        let us = mover.color;
        if us != board.state.side_to_move {
            return Err(ExecutionError::NotSideToMove {
                square: from,
                color: us,
            });
        }

        let mut effects = SmallVec::new();
        effects.push(MoveEffect::Remove {
            square: from,
            piece: mover,
        });

        let captured = if mv.is_en_passant() {
            let square = Square::new(to.file(), from.rank());
            let pawn = ColoredPiece::new(Piece::Pawn, us.opposite());
            if board.piece_at(square) != Some(pawn) {
                return Err(ExecutionError::MissingEnPassantPawn(square));
            }
            Some((square, pawn))
        } else {
            match board.piece_at(to) {
                Some(piece) if piece.color == us => {
                    return Err(ExecutionError::BlockedTarget(to));
                }
                Some(piece) => Some((to, piece)),
                None => None,
            }
        };
        if let Some((square, piece)) = captured {
            effects.push(MoveEffect::Remove { square, piece });
        }

        let landed = match mv.promotion_piece() {
            Some(piece) if mover.piece == Piece::Pawn => ColoredPiece::new(piece, us),
            _ => mover,
        };
        effects.push(MoveEffect::Place {
            square: to,
            piece: landed,
        });

        let castle = match mv.flag() {
            MoveFlag::CastleKingside => Some(CastleSide::Kingside),
            MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        };
        if let Some(side) = castle {
            let rook = ColoredPiece::new(Piece::Rook, us);
            let home = side.rook_home(us);
            if board.piece_at(home) != Some(rook) {
                return Err(ExecutionError::MissingCastlingRook(home));
            }
            effects.push(MoveEffect::Remove {
                square: home,
                piece: rook,
            });
            effects.push(MoveEffect::Place {
                square: side.rook_target(us),
                piece: rook,
            });
        }

        let prev = board.state;
        let next = next_state(prev, mover, from, to, captured);
        effects.push(MoveEffect::Transition { prev, next });

        Ok(MoveExecution { mv, effects })
    }

    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn effects(&self) -> &[MoveEffect] {
        &self.effects
    }

    pub fn apply(&self, board: &mut Board) {
        for effect in &self.effects {
            effect.apply(board);
        }
    }

    pub fn revert(&self, board: &mut Board) {
        for effect in self.effects.iter().rev() {
            effect.revert(board);
        }
    }
}

fn next_state(
    prev: BoardState,
    mover: ColoredPiece,
    from: Square,
    to: Square,
    captured: Option<(Square, ColoredPiece)>,
) -> BoardState {
    let us = mover.color;
    let mut next = prev;
    next.side_to_move = us.opposite();

    let is_pawn = mover.piece == Piece::Pawn;
    next.halfmove_clock = if is_pawn || captured.is_some() {
        0
    } else {
        prev.halfmove_clock.saturating_add(1)
    };
    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.en_passant = if is_pawn && from.index().abs_diff(to.index()) == 16 {
        Some(Square::nth((from.index() + to.index()) / 2))
    } else {
        None
    };

    match mover.piece {
        Piece::King => next.castling.revoke_all(us),
        Piece::Rook => {
            if let Some(side) = CastleSide::from_rook_home(from, us) {
                next.castling.revoke(us, side);
            }
        }
        _ => {}
    }
    if let Some((square, piece)) = captured {
        if piece.piece == Piece::Rook {
            if let Some(side) = CastleSide::from_rook_home(square, piece.color) {
                next.castling.revoke(piece.color, side);
            }
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use movegen_core::Fen;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn run(fen: &str, uci: &str) -> (Board, Board, MoveExecution) {
        let before = Board::from_fen(fen).unwrap();
        let mv = before.find_move(uci).unwrap().unwrap();
        let execution = MoveExecution::build(&before, mv).unwrap();
        let mut after = before.clone();
        execution.apply(&mut after);
        (before, after, execution)
    }

    #[test]
    fn quiet_move_has_three_effects() {
        let (before, after, execution) = run(Fen::STARTPOS, "g1f3");
        assert_eq!(execution.effects().len(), 3);
        assert_eq!(after.piece_at(sq("f3")), before.piece_at(Square::G1));
        assert_eq!(after.piece_at(Square::G1), None);
        assert_eq!(after.state.side_to_move, Color::Black);
        assert_eq!(after.state.halfmove_clock, 1);
        assert_eq!(after.state.fullmove_number, 1);
        assert_eq!(after.state.en_passant, None);
    }

    #[test]
    fn effect_order_is_remove_capture_place_state() {
        let (_, _, execution) = run(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "e4d5",
        );
        let effects = execution.effects();
        assert_eq!(effects.len(), 4);
        assert!(matches!(effects[0], MoveEffect::Remove { square, .. } if square == sq("e4")));
        assert!(matches!(
            effects[1],
            MoveEffect::Remove { square, piece } if square == sq("d5") && piece.color == Color::Black
        ));
        assert!(matches!(effects[2], MoveEffect::Place { square, .. } if square == sq("d5")));
        assert!(matches!(effects[3], MoveEffect::Transition { .. }));
    }

    #[test]
    fn double_push_sets_the_en_passant_square() {
        let (_, after, _) = run(Fen::STARTPOS, "e2e4");
        assert_eq!(after.state.en_passant, Some(sq("e3")));
        assert_eq!(after.state.halfmove_clock, 0);

        let (_, after, _) = run(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "c7c5",
        );
        assert_eq!(after.state.en_passant, Some(sq("c6")));
        assert_eq!(after.state.fullmove_number, 2);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_target() {
        let (before, after, execution) = run(
            "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3",
            "f5e6",
        );
        assert!(execution.mv().is_en_passant());
        assert_eq!(after.piece_at(sq("e5")), None);
        assert_eq!(after.piece_at(sq("e6")), before.piece_at(sq("f5")));
        assert_eq!(after.occupied().count(), before.occupied().count() - 1);
    }

    #[test]
    fn promotion_substitutes_the_piece() {
        let (_, after, _) = run("1n2k3/P7/8/8/8/8/8/4K3 w - - 5 40", "a7b8n");
        assert_eq!(
            after.piece_at(sq("b8")),
            Some(ColoredPiece::new(Piece::Knight, Color::White))
        );
        assert!(after.pieces_of(Piece::Pawn, Color::White).is_empty());
        assert_eq!(after.state.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_king_and_rook() {
        let (before, after, execution) =
            run("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1", "e1c1");
        assert_eq!(execution.effects().len(), 5);
        assert_eq!(after.piece_at(Square::C1), before.piece_at(Square::E1));
        assert_eq!(after.piece_at(Square::D1), before.piece_at(Square::A1));
        assert_eq!(after.piece_at(Square::A1), None);
        assert!(!after.state.castling.has(Color::White, CastleSide::Kingside));
        assert!(!after.state.castling.has(Color::White, CastleSide::Queenside));
        assert!(after.state.castling.has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn rook_leaving_home_revokes_one_side() {
        let (_, after, _) = run("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1", "h1g1");
        assert!(!after.state.castling.has(Color::White, CastleSide::Kingside));
        assert!(after.state.castling.has(Color::White, CastleSide::Queenside));
    }

    #[test]
    fn capturing_a_rook_at_home_revokes_its_side() {
        let (_, after, _) = run("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1", "g2h1");
        assert!(!after.state.castling.has(Color::White, CastleSide::Kingside));
        assert!(after.state.castling.has(Color::White, CastleSide::Queenside));
        assert!(after.state.castling.has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn revert_restores_the_board() {
        for (fen, uci) in [
            (Fen::STARTPOS, "e2e4"),
            ("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1", "e1g1"),
            ("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3", "f5e6"),
            ("1n2k3/P7/8/8/8/8/8/4K3 w - - 5 40", "a7b8q"),
        ] {
            let (before, mut after, execution) = run(fen, uci);
            assert_ne!(before, after);
            execution.revert(&mut after);
            assert_eq!(before, after, "{uci} from {fen}");
        }
    }

    #[test]
    fn build_rejects_inconsistent_moves() {
        let board = Board::startpos();
        assert_eq!(
            MoveExecution::build(&board, Move::quiet(sq("e4"), sq("e5"))),
            Err(ExecutionError::EmptyOrigin(sq("e4")))
        );
        assert_eq!(
            MoveExecution::build(&board, Move::quiet(sq("e7"), sq("e5"))),
            Err(ExecutionError::NotSideToMove {
                square: sq("e7"),
                color: Color::Black
            })
        );
        assert_eq!(
            MoveExecution::build(&board, Move::quiet(Square::A1, sq("a2"))),
            Err(ExecutionError::BlockedTarget(sq("a2")))
        );
        assert_eq!(
            MoveExecution::build(&board, Move::new(sq("e2"), sq("d3"), MoveFlag::EnPassant)),
            Err(ExecutionError::MissingEnPassantPawn(sq("d2")))
        );
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
        assert_eq!(
            MoveExecution::build(
                &board,
                Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside)
            ),
            Err(ExecutionError::MissingCastlingRook(Square::H1))
        );
    }

    #[test]
    fn clocks_saturate_at_their_limit() {
        let (_, after, _) = run("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1", "e1e2");
        assert_eq!(after.state.halfmove_clock, u32::MAX);
        assert_eq!(after.state.fullmove_number, 1);

        let (_, after, _) = run("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295", "e8e7");
        assert_eq!(after.state.halfmove_clock, 1);
        assert_eq!(after.state.fullmove_number, u32::MAX);
    }
}
