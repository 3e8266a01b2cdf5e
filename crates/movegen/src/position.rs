//! A board with undo history.

use movegen_core::{Fen, Move};
use thiserror::Error;
use tracing::debug;

use crate::execution::{ExecutionError, MoveExecution};
use crate::legal::MoveList;
use crate::{Board, BoardError};

/// Error type for position operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// A [`Board`] plus the stack of executions that led to it.
///
/// Moves are undone strictly last-in, first-out.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    history: Vec<MoveExecution>,
}

impl Position {
    pub fn new(board: Board) -> Self {
        Position {
            board,
            history: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        Self::new(Board::startpos())
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self::new(Board::from_fen(fen)?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Applies `mv` and records it for [`revert_move`](Self::revert_move).
    ///
    /// The move is not checked for legality, only for consistency with the
    /// board; on error the position is unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ExecutionError> {
        let execution = MoveExecution::build(&self.board, mv)?;
        execution.apply(&mut self.board);
        self.history.push(execution);
        Ok(())
    }

    /// Undoes the most recent move and returns it, or `None` when there is
    /// nothing to undo.
    pub fn revert_move(&mut self) -> Option<Move> {
        let Some(execution) = self.history.pop() else {
            debug!("revert_move called with empty history");
            return None;
        };
        execution.revert(&mut self.board);
        Some(execution.mv())
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(MoveExecution::mv)
    }

    pub fn legal_moves(&self) -> Result<MoveList, BoardError> {
        self.board.legal_moves()
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> Result<bool, BoardError> {
        self.board.in_check()
    }

    /// Resolves coordinate notation to a legal move in this position.
    pub fn parse_move(&self, notation: &str) -> Result<Move, PositionError> {
        if Move::from_uci(notation).is_none() {
            return Err(PositionError::InvalidNotation(notation.to_string()));
        }
        self.board
            .find_move(notation)?
            .ok_or_else(|| PositionError::IllegalMove(notation.to_string()))
    }

    /// Parses and applies a move given in coordinate notation.
    pub fn play(&mut self, notation: &str) -> Result<Move, PositionError> {
        let mv = self.parse_move(notation)?;
        self.apply_move(mv)?;
        Ok(mv)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<Board> for Position {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}

impl From<&Position> for Fen {
    fn from(position: &Position) -> Self {
        Fen::from(&position.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movegen_core::{Color, MoveFlag, Square};

    #[test]
    fn new_position_cannot_undo() {
        let mut position = Position::startpos();
        assert!(!position.can_undo());
        assert_eq!(position.history_len(), 0);
        assert_eq!(position.revert_move(), None);
        assert_eq!(position.board(), &Board::startpos());
    }

    #[test]
    fn play_and_undo() {
        let mut position = Position::startpos();
        let mv = position.play("e2e4").unwrap();
        assert_eq!(mv.flag(), MoveFlag::DoublePush);
        assert!(position.can_undo());
        assert_eq!(position.last_move(), Some(mv));
        assert_eq!(position.board().side_to_move(), Color::Black);

        position.play("e7e5").unwrap();
        position.play("g1f3").unwrap();
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );

        assert_eq!(position.revert_move().map(|m| m.to_uci()), Some("g1f3".into()));
        assert_eq!(position.revert_move().map(|m| m.to_uci()), Some("e7e5".into()));
        assert_eq!(position.revert_move(), Some(mv));
        assert!(!position.can_undo());
        assert_eq!(position.board(), &Board::startpos());
    }

    #[test]
    fn parse_errors() {
        let position = Position::startpos();
        assert_eq!(
            position.parse_move("e2"),
            Err(PositionError::InvalidNotation("e2".to_string()))
        );
        assert_eq!(
            position.parse_move("e2e5"),
            Err(PositionError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(
            position.parse_move("e7e8x"),
            Err(PositionError::InvalidNotation("e7e8x".to_string()))
        );
    }

    #[test]
    fn failed_apply_leaves_position_untouched() {
        let mut position = Position::startpos();
        let err = position
            .apply_move(Move::quiet(Square::E1, Square::D1))
            .unwrap_err();
        assert_eq!(err, ExecutionError::BlockedTarget(Square::D1));
        assert!(!position.can_undo());
        assert_eq!(position.board(), &Board::startpos());
    }

    #[test]
    fn check_detection() {
        let mut position = Position::startpos();
        for mv in ["f2f3", "e7e5", "g2g4"] {
            position.play(mv).unwrap();
        }
        assert!(!position.is_check().unwrap());
        position.play("d8h4").unwrap();
        assert!(position.is_check().unwrap());
        assert!(position.legal_moves().unwrap().is_empty());
    }

    #[test]
    fn bad_fen_is_reported() {
        assert!(matches!(
            Position::from_fen("not a fen"),
            Err(PositionError::Board(BoardError::Fen(_)))
        ));
    }
}
