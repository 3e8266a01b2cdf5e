//! Castling rights.

use crate::{Color, Square};

/// Which castling side a right or a move refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Home square of the rook that castles on this side.
    pub const fn rook_home(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Square::H1,
            (CastleSide::Queenside, Color::White) => Square::A1,
            (CastleSide::Kingside, Color::Black) => Square::H8,
            (CastleSide::Queenside, Color::Black) => Square::A8,
        }
    }

    /// Square the rook lands on after castling.
    pub const fn rook_target(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Square::F1,
            (CastleSide::Queenside, Color::White) => Square::D1,
            (CastleSide::Kingside, Color::Black) => Square::F8,
            (CastleSide::Queenside, Color::Black) => Square::D8,
        }
    }

    /// Square the king lands on after castling.
    pub const fn king_target(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Square::G1,
            (CastleSide::Queenside, Color::White) => Square::C1,
            (CastleSide::Kingside, Color::Black) => Square::G8,
            (CastleSide::Queenside, Color::Black) => Square::C8,
        }
    }

    /// Square the king crosses on its way to the target.
    pub const fn king_transit(self, color: Color) -> Square {
        self.rook_target(color)
    }

    /// The side whose rook starts on `sq`, if `sq` is a rook home square of `color`.
    pub const fn from_rook_home(sq: Square, color: Color) -> Option<CastleSide> {
        if sq.index() == CastleSide::Kingside.rook_home(color).index() {
            Some(CastleSide::Kingside)
        } else if sq.index() == CastleSide::Queenside.rook_home(color).index() {
            Some(CastleSide::Queenside)
        } else {
            None
        }
    }
}

/// The four castling flags, packed into the low nibble of a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;

    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::flag(color, side);
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Drops both rights of `color`.
    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// FEN castling field, "-" when no right is left.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ]
        .iter()
        .filter(|(color, side, _)| self.has(*color, *side))
        .map(|(_, _, c)| *c)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke() {
        let mut rights = CastlingRights::NONE;
        rights.grant(Color::White, CastleSide::Kingside);
        assert!(rights.has(Color::White, CastleSide::Kingside));
        assert!(!rights.has(Color::White, CastleSide::Queenside));
        assert!(!rights.has(Color::Black, CastleSide::Kingside));

        rights.revoke(Color::White, CastleSide::Kingside);
        assert!(rights.is_empty());
    }

    #[test]
    fn revoke_all_leaves_other_color() {
        let mut rights = CastlingRights::ALL;
        rights.revoke_all(Color::Black);
        assert!(rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::White, CastleSide::Queenside));
        assert!(!rights.has(Color::Black, CastleSide::Kingside));
        assert!(!rights.has(Color::Black, CastleSide::Queenside));
    }

    #[test]
    fn fen_field() {
        assert_eq!(CastlingRights::ALL.to_fen(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_fen(), "-");
        assert_eq!(
            CastlingRights::new(CastlingRights::WHITE_QUEENSIDE | CastlingRights::BLACK_KINGSIDE)
                .to_fen(),
            "Qk"
        );
    }

    #[test]
    fn castle_geometry() {
        assert_eq!(CastleSide::Kingside.rook_home(Color::White), Square::H1);
        assert_eq!(CastleSide::Queenside.rook_target(Color::Black), Square::D8);
        assert_eq!(CastleSide::Kingside.king_target(Color::Black), Square::G8);
        assert_eq!(CastleSide::Queenside.king_transit(Color::White), Square::D1);
        assert_eq!(
            CastleSide::from_rook_home(Square::A8, Color::Black),
            Some(CastleSide::Queenside)
        );
        assert_eq!(CastleSide::from_rook_home(Square::A8, Color::White), None);
    }
}
