//! Board representation: piece placement plus the non-placement state.

use movegen_core::{CastlingRights, Color, ColoredPiece, Fen, FenError, Piece, Square};
use std::fmt;
use thiserror::Error;

use crate::legal::{self, MoveList};
use crate::Bitboard;

/// Errors raised when a board breaks a structural invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("{count} {color} kings on the board")]
    MultipleKings { color: Color, count: u32 },

    #[error(transparent)]
    Fen(#[from] FenError),
}

/// Everything about a position that is not piece placement.
///
/// Moves swap this as a single snapshot, which is what makes undo exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Starts at 1, increments after Black's move.
    pub fullmove_number: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState {
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// Piece placement by kind and by color, plus [`BoardState`].
///
/// A square is occupied in `pieces` exactly when it is occupied in `colors`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Indexed by [`Piece::index`].
    pub pieces: [Bitboard; 6],
    /// Indexed by [`Color::index`].
    pub colors: [Bitboard; 2],
    pub state: BoardState,
}

impl Board {
    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            state: BoardState::default(),
        }
    }

    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.state.castling = CastlingRights::ALL;
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            let file = file as u8;
            board.put_piece(Square::nth(file), ColoredPiece::new(piece, Color::White));
            board.put_piece(Square::nth(8 + file), ColoredPiece::new(Piece::Pawn, Color::White));
            board.put_piece(Square::nth(48 + file), ColoredPiece::new(Piece::Pawn, Color::Black));
            board.put_piece(Square::nth(56 + file), ColoredPiece::new(piece, Color::Black));
        }
        board
    }

    /// Parses a FEN string into a board.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let record = Fen::parse(fen)?;
        Ok(Board::from(&record))
    }

    pub fn to_fen(&self) -> String {
        Fen::from(self).to_string()
    }

    /// The piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        let color = if self.colors[Color::White.index()].contains(sq) {
            Color::White
        } else if self.colors[Color::Black.index()].contains(sq) {
            Color::Black
        } else {
            return None;
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
            .map(|piece| ColoredPiece::new(piece, color))
    }

    /// Sets `piece` on `sq`. The square is expected to be empty.
    #[inline]
    pub fn put_piece(&mut self, sq: Square, piece: ColoredPiece) {
        self.pieces[piece.piece.index()].set(sq);
        self.colors[piece.color.index()].set(sq);
    }

    /// Clears `piece` from `sq`.
    #[inline]
    pub fn remove_piece(&mut self, sq: Square, piece: ColoredPiece) {
        self.pieces[piece.piece.index()].clear(sq);
        self.colors[piece.color.index()].clear(sq);
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline]
    pub fn unoccupied(&self) -> Bitboard {
        !self.occupied()
    }

    /// Squares holding pieces of `color`.
    #[inline]
    pub fn friendly(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Squares holding pieces of the side opposing `color`.
    #[inline]
    pub fn enemy(&self, color: Color) -> Bitboard {
        self.colors[color.opposite().index()]
    }

    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    /// The square of `color`'s king.
    ///
    /// Fails when the board holds no king or more than one for that color.
    pub fn king_square(&self, color: Color) -> Result<Square, BoardError> {
        let kings = self.pieces_of(Piece::King, color);
        if kings.more_than_one() {
            return Err(BoardError::MultipleKings {
                color,
                count: kings.count(),
            });
        }
        kings.lsb().ok_or(BoardError::MissingKing(color))
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Result<MoveList, BoardError> {
        legal::generate_legal_moves(self, self.state.side_to_move)
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> Result<bool, BoardError> {
        let us = self.state.side_to_move;
        let king = self.king_square(us)?;
        Ok(crate::check::checkers(self, king, us.opposite()).is_not_empty())
    }

    /// Resolves coordinate notation such as `e2e4` or `e7e8q` to the
    /// matching legal move, with its full flag.
    ///
    /// Returns `Ok(None)` when the notation is well formed but names no legal move.
    pub fn find_move(&self, notation: &str) -> Result<Option<movegen_core::Move>, BoardError> {
        let Some(wanted) = movegen_core::Move::from_uci(notation) else {
            return Ok(None);
        };
        Ok(self
            .legal_moves()?
            .iter()
            .copied()
            .find(|mv| mv.same_notation(wanted)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<&Fen> for Board {
    fn from(record: &Fen) -> Self {
        let mut board = Board::empty();
        for (index, slot) in record.placement.iter().enumerate() {
            if let Some(piece) = slot {
                board.put_piece(Square::nth(index as u8), *piece);
            }
        }
        board.state = BoardState {
            side_to_move: record.side_to_move,
            castling: record.castling,
            en_passant: record.en_passant,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
        };
        board
    }
}

impl From<&Board> for Fen {
    fn from(board: &Board) -> Self {
        let mut placement = [None; 64];
        for (index, slot) in placement.iter_mut().enumerate() {
            *slot = board.piece_at(Square::nth(index as u8));
        }
        Fen {
            placement,
            side_to_move: board.state.side_to_move,
            castling: board.state.castling,
            en_passant: board.state.en_passant,
            halfmove_clock: board.state.halfmove_clock,
            fullmove_number: board.state.fullmove_number,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let mark = self
                    .piece_at(Square::nth(rank * 8 + file))
                    .map_or('.', |piece| piece.to_fen_char());
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movegen_core::{File, Rank};

    #[test]
    fn startpos_matches_fen() {
        let built = Board::startpos();
        let parsed = Board::from_fen(Fen::STARTPOS).unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);

        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.state.en_passant, Square::from_algebraic("e3"));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn bad_fen_is_wrapped() {
        let err = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1")
            .unwrap_err();
        assert!(matches!(err, BoardError::Fen(FenError::Piece(_))));
    }

    #[test]
    fn piece_lookup() {
        let board = Board::startpos();
        assert_eq!(
            board.piece_at(Square::E1),
            Some(ColoredPiece::new(Piece::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::D8),
            Some(ColoredPiece::new(Piece::Queen, Color::Black))
        );
        assert_eq!(board.piece_at(Square::new(File::E, Rank::R4)), None);
    }

    #[test]
    fn put_and_remove() {
        let mut board = Board::empty();
        let knight = ColoredPiece::new(Piece::Knight, Color::Black);
        let sq = Square::new(File::C, Rank::R6);
        board.put_piece(sq, knight);
        assert_eq!(board.piece_at(sq), Some(knight));
        assert_eq!(board.occupied().count(), 1);
        board.remove_piece(sq, knight);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn occupancy_views() {
        let board = Board::startpos();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.unoccupied().count(), 32);
        assert_eq!(board.friendly(Color::White).count(), 16);
        assert_eq!(board.enemy(Color::White), board.friendly(Color::Black));
        assert_eq!(board.pieces_of(Piece::Pawn, Color::Black).count(), 8);
    }

    #[test]
    fn king_square_checks_structure() {
        let board = Board::startpos();
        assert_eq!(board.king_square(Color::Black), Ok(Square::E8));

        let board = Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            board.king_square(Color::Black),
            Err(BoardError::MissingKing(Color::Black))
        );

        let board = Board::from_fen("k7/8/8/8/8/8/8/K3K3 w - - 0 1").unwrap();
        assert_eq!(
            board.king_square(Color::White),
            Err(BoardError::MultipleKings {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn find_move_resolves_flags() {
        let board = Board::startpos();
        let mv = board.find_move("e2e4").unwrap().unwrap();
        assert_eq!(mv.flag(), movegen_core::MoveFlag::DoublePush);
        assert_eq!(board.find_move("e2e5").unwrap(), None);
        assert_eq!(board.find_move("zz").unwrap(), None);
    }

    #[test]
    fn display_draws_board_and_fen() {
        let text = Board::startpos().to_string();
        assert!(text.starts_with("8 r n b q k b n r"));
        assert!(text.ends_with(Fen::STARTPOS));
    }
}
