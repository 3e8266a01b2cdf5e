//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// What kind of move a [`Move`] is.
///
/// The discriminants form a 4-bit code: bit 2 marks captures, bit 3 marks
/// promotions, and the low two bits of a promotion select the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Non-capturing move with no side effects.
    Quiet = 0,
    /// Pawn advance of two squares from its starting rank.
    DoublePush = 1,
    /// King to the g-file, rook from h to f.
    CastleKingside = 2,
    /// King to the c-file, rook from a to d.
    CastleQueenside = 3,
    /// Capture of the piece on the destination square.
    Capture = 4,
    /// Pawn capture of a pawn that just double-pushed past it.
    EnPassant = 5,
    PromoteKnight = 8,
    PromoteBishop = 9,
    PromoteRook = 10,
    PromoteQueen = 11,
    PromoteKnightCapture = 12,
    PromoteBishopCapture = 13,
    PromoteRookCapture = 14,
    PromoteQueenCapture = 15,
}

impl MoveFlag {
    const CAPTURE_BIT: u8 = 0b0100;
    const PROMOTION_BIT: u8 = 0b1000;

    const fn from_bits(bits: u8) -> Self {
        match bits & 0xF {
            1 => MoveFlag::DoublePush,
            2 => MoveFlag::CastleKingside,
            3 => MoveFlag::CastleQueenside,
            4 => MoveFlag::Capture,
            5 => MoveFlag::EnPassant,
            8 => MoveFlag::PromoteKnight,
            9 => MoveFlag::PromoteBishop,
            10 => MoveFlag::PromoteRook,
            11 => MoveFlag::PromoteQueen,
            12 => MoveFlag::PromoteKnightCapture,
            13 => MoveFlag::PromoteBishopCapture,
            14 => MoveFlag::PromoteRookCapture,
            15 => MoveFlag::PromoteQueenCapture,
            _ => MoveFlag::Quiet,
        }
    }

    /// Promotion flag for `piece`, or `None` if the piece cannot be promoted to.
    pub const fn promotion(piece: Piece, capture: bool) -> Option<Self> {
        let base = match piece {
            Piece::Knight => 8,
            Piece::Bishop => 9,
            Piece::Rook => 10,
            Piece::Queen => 11,
            Piece::Pawn | Piece::King => return None,
        };
        let bits = if capture {
            base | Self::CAPTURE_BIT
        } else {
            base
        };
        Some(Self::from_bits(bits))
    }

    /// Piece a pawn turns into, if this is a promotion.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        if !self.is_promotion() {
            return None;
        }
        Some(match (self as u8) & 0b11 {
            0 => Piece::Knight,
            1 => Piece::Bishop,
            2 => Piece::Rook,
            _ => Piece::Queen,
        })
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self as u8) & Self::PROMOTION_BIT != 0
    }

    /// True for every capture, en passant and capturing promotions included.
    #[inline]
    pub const fn is_capture(self) -> bool {
        (self as u8) & Self::CAPTURE_BIT != 0
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A move: origin, destination, and a [`MoveFlag`].
///
/// Packed into 16 bits: 6 bits from, 6 bits to, 4 bits flag. A move carries
/// no execution logic of its own.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Placeholder value; never a legal move.
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6) | ((flag as u16) << 12))
    }

    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Quiet)
    }

    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Capture)
    }

    /// A pawn promotion.
    ///
    /// Asking for a pawn or a king yields a plain quiet move or capture, so
    /// the result never advertises a promotion it cannot perform.
    pub const fn promotion(from: Square, to: Square, piece: Piece, capture: bool) -> Self {
        let flag = match MoveFlag::promotion(piece, capture) {
            Some(flag) => flag,
            None if capture => MoveFlag::Capture,
            None => MoveFlag::Quiet,
        };
        Self::new(from, to, flag)
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::nth((self.0 & 0x3F) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::nth(((self.0 >> 6) & 0x3F) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits((self.0 >> 12) as u8)
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        self.flag().promotion_piece()
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flag().is_capture()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.flag().is_castling()
    }

    /// True if both moves share origin, destination and promotion piece.
    ///
    /// Used to resolve a flagless move parsed from notation against the
    /// fully flagged moves of a position.
    #[inline]
    pub fn same_notation(self, other: Move) -> bool {
        self.from() == other.from()
            && self.to() == other.to()
            && self.promotion_piece() == other.promotion_piece()
    }

    /// Coordinate notation, e.g. "e2e4" or "e7e8q".
    pub fn to_uci(self) -> String {
        match self.promotion_piece() {
            Some(piece) => format!("{}{}{}", self.from(), self.to(), piece.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }

    /// Parses coordinate notation.
    ///
    /// The result only knows its squares and promotion piece; capture,
    /// castling and en-passant flags come from the position the move is
    /// played in.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s[4..].chars().next() {
            None => Some(Move::quiet(from, to)),
            Some(c) => {
                let flag = MoveFlag::promotion(Piece::from_char(c)?, false)?;
                Some(Move::new(from, to, flag))
            }
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?})", self.to_uci(), self.flag())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}
