//! Side representation.

use crate::Rank;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Array index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank the king and rooks start on.
    #[inline]
    pub const fn home_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// Rank this side's pawns start on, and the only rank a double push leaves from.
    #[inline]
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// Rank a pawn of this side must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_rank(self) -> Rank {
        match self {
            Color::White => Rank::R5,
            Color::Black => Rank::R4,
        }
    }

    /// Rank this side's pawns promote on.
    #[inline]
    pub const fn promotion_rank(self) -> Rank {
        match self {
            Color::White => Rank::R8,
            Color::Black => Rank::R1,
        }
    }

    /// Square-index delta of a single pawn step (+8 for White, -8 for Black).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// FEN side-to-move character.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parses a FEN side-to-move character.
    #[inline]
    pub const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for color in Color::ALL {
            assert_eq!(color.opposite().opposite(), color);
        }
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn ranks_per_side() {
        assert_eq!(Color::White.home_rank(), Rank::R1);
        assert_eq!(Color::Black.pawn_rank(), Rank::R7);
        assert_eq!(Color::White.en_passant_rank(), Rank::R5);
        assert_eq!(Color::Black.en_passant_rank(), Rank::R4);
        assert_eq!(Color::Black.promotion_rank(), Rank::R1);
    }

    #[test]
    fn forward_step() {
        assert_eq!(Color::White.forward(), 8);
        assert_eq!(Color::Black.forward(), -8);
    }

    #[test]
    fn fen_char() {
        assert_eq!(Color::from_fen_char('w'), Some(Color::White));
        assert_eq!(Color::from_fen_char('b'), Some(Color::Black));
        assert_eq!(Color::from_fen_char('W'), None);
        assert_eq!(Color::Black.to_fen_char(), 'b');
    }

    #[test]
    fn display() {
        assert_eq!(Color::White.to_string(), "White");
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
