//! Piece kinds and colored pieces.

use crate::Color;
use std::fmt;
use thiserror::Error;

/// Raised when a character does not name a piece.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PieceError {
    #[error("invalid piece character '{0}'")]
    InvalidChar(char),
}

/// The six kinds of chess pieces.
///
/// An empty square is modelled as the absence of a piece (`Option`), never
/// as an extra variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All kinds in index order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Promotion targets, in the order promotions are generated.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter for this kind.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Parses a letter in either case.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// True for bishop, rook and queen.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// True for the kinds a pawn may promote to.
    #[inline]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
        )
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        })
    }
}

/// A piece kind together with its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredPiece {
    pub piece: Piece,
    pub color: Color,
}

impl ColoredPiece {
    #[inline]
    pub const fn new(piece: Piece, color: Color) -> Self {
        ColoredPiece { piece, color }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        let c = self.piece.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl TryFrom<char> for ColoredPiece {
    type Error = PieceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let piece = Piece::from_char(c).ok_or(PieceError::InvalidChar(c))?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(ColoredPiece { piece, color })
    }
}

impl fmt::Display for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_piece_from_char() {
        assert_eq!(
            ColoredPiece::try_from('P'),
            Ok(ColoredPiece::new(Piece::Pawn, Color::White))
        );
        assert_eq!(
            ColoredPiece::try_from('k'),
            Ok(ColoredPiece::new(Piece::King, Color::Black))
        );
        assert_eq!(
            ColoredPiece::try_from('x'),
            Err(PieceError::InvalidChar('x'))
        );
        assert_eq!(
            ColoredPiece::try_from('1'),
            Err(PieceError::InvalidChar('1'))
        );
    }

    #[test]
    fn fen_char_roundtrip() {
        for c in "pnbrqkPNBRQK".chars() {
            let piece = ColoredPiece::try_from(c).unwrap();
            assert_eq!(piece.to_fen_char(), c);
        }
    }

    #[test]
    fn sliders_and_promotions() {
        assert!(!Piece::Pawn.is_slider());
        assert!(!Piece::Knight.is_slider());
        assert!(Piece::Bishop.is_slider());
        assert!(Piece::Queen.is_slider());
        assert!(!Piece::King.is_slider());

        assert!(Piece::PROMOTIONS.iter().all(|p| p.is_promotable()));
        assert!(!Piece::Pawn.is_promotable());
        assert!(!Piece::King.is_promotable());
    }

    #[test]
    fn error_message_names_the_char() {
        assert!(PieceError::InvalidChar('z').to_string().contains('z'));
    }
}
