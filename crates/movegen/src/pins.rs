//! Absolute pin detection.

use crate::attacks::{between, ray, Direction, RayClass};
use crate::{Bitboard, Board};
use movegen_core::{Color, Piece, Square};

/// One of the eight rays leaving the king's square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRay {
    pub ray: Bitboard,
    pub class: RayClass,
    pub direction: Direction,
}

impl PinRay {
    pub fn new(king: Square, direction: Direction) -> Self {
        PinRay {
            ray: ray(king, direction),
            class: direction.class(),
            direction,
        }
    }

    /// Enemy pieces able to pin along this ray.
    fn pinners(&self, board: &Board, enemy: Color) -> Bitboard {
        let line_piece = match self.class {
            RayClass::Orthogonal => Piece::Rook,
            RayClass::Diagonal => Piece::Bishop,
        };
        board.pieces_of(line_piece, enemy) | board.pieces_of(Piece::Queen, enemy)
    }
}

/// Pinned friendly pieces and the line each may still move along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinResult {
    pub pinned: Bitboard,
    /// Indexed by square; only entries for pinned squares are meaningful.
    pub allowed: [Bitboard; 64],
}

impl PinResult {
    pub fn none() -> Self {
        PinResult {
            pinned: Bitboard::EMPTY,
            allowed: [Bitboard::EMPTY; 64],
        }
    }

    #[inline]
    pub fn is_pinned(&self, sq: Square) -> bool {
        self.pinned.contains(sq)
    }

    /// Destinations a piece on `sq` may reach without exposing its king:
    /// its pin line if pinned, otherwise every square.
    #[inline]
    pub fn allowed(&self, sq: Square) -> Bitboard {
        if self.is_pinned(sq) {
            self.allowed[sq.index() as usize]
        } else {
            Bitboard::FULL
        }
    }
}

/// Finds every piece of `us` pinned against the king on `king`.
///
/// The allowed line of a pinned piece runs from next to the king up to and
/// including the pinner, so capturing the pinner stays legal.
pub fn detect_pins(board: &Board, king: Square, us: Color) -> PinResult {
    let mut result = PinResult::none();
    let occupied = board.occupied();
    let friendly = board.friendly(us);

    for direction in Direction::ALL {
        let line = PinRay::new(king, direction);
        let blockers = line.ray & occupied;
        let Some(first) = direction.nearest(blockers) else {
            continue;
        };
        if !friendly.contains(first) {
            continue;
        }
        let mut behind = blockers;
        behind.clear(first);
        let Some(second) = direction.nearest(behind) else {
            continue;
        };
        if line.pinners(board, us.opposite()).contains(second) {
            result.pinned.set(first);
            result.allowed[first.index() as usize] =
                between(king, second) | Bitboard::from_square(second);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn set(squares: &[&str]) -> Bitboard {
        squares.iter().map(|s| sq(s)).collect()
    }

    fn white_pins(fen: &str) -> PinResult {
        let board = Board::from_fen(fen).unwrap();
        let king = board.king_square(Color::White).unwrap();
        detect_pins(&board, king, Color::White)
    }

    #[test]
    fn startpos_has_no_pins() {
        let board = Board::startpos();
        let pins = detect_pins(&board, Square::E1, Color::White);
        assert!(pins.pinned.is_empty());
        assert_eq!(pins.allowed(sq("e2")), Bitboard::FULL);
    }

    #[test]
    fn rook_pins_along_a_file() {
        let pins = white_pins("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert_eq!(pins.pinned, set(&["e2"]));
        assert_eq!(
            pins.allowed(sq("e2")),
            set(&["e2", "e3", "e4", "e5", "e6", "e7"])
        );
    }

    #[test]
    fn bishop_pins_along_a_descending_diagonal() {
        // King on h8 looks south-west toward the pinner; nearest is the highest bit.
        let board = Board::from_fen("7K/6P1/8/8/3b4/8/8/k7 w - - 0 1").unwrap();
        let pins = detect_pins(&board, Square::H8, Color::White);
        assert_eq!(pins.pinned, set(&["g7"]));
        assert_eq!(pins.allowed(sq("g7")), set(&["g7", "f6", "e5", "d4"]));
    }

    #[test]
    fn queen_pins_on_both_geometries() {
        let pins = white_pins("4k3/8/8/q7/8/8/3B4/4K2q w - - 0 1");
        assert!(pins.is_pinned(sq("d2")));
        assert!(!pins.is_pinned(sq("e1")));
        let pins = white_pins("4k3/8/8/8/8/8/8/R3K1Nq w - - 0 1");
        assert_eq!(pins.pinned, set(&["g1"]));
    }

    #[test]
    fn wrong_geometry_does_not_pin() {
        // A rook on a diagonal and a bishop on a file pin nothing.
        let pins = white_pins("4k3/8/8/r3b3/8/8/3N4/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
        let pins = white_pins("4k3/4b3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
    }

    #[test]
    fn second_friendly_blocker_removes_the_pin() {
        let pins = white_pins("4k3/4r3/8/4P3/8/8/4N3/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
    }

    #[test]
    fn second_enemy_blocker_removes_the_pin() {
        // The e5 pawn shields e2 from the e7 rook.
        let pins = white_pins("4k3/4r3/8/4p3/8/8/4N3/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
        assert_eq!(pins.allowed(sq("e2")), Bitboard::FULL);
    }

    #[test]
    fn enemy_first_blocker_is_not_a_pin() {
        let pins = white_pins("4k3/4r3/8/8/8/8/4n3/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
    }

    #[test]
    fn no_pinner_behind_is_not_a_pin() {
        let pins = white_pins("4k3/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
        let pins = white_pins("4k3/4n3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(pins.pinned.is_empty());
    }
}
