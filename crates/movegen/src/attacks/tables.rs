//! Precomputed geometric tables.
//!
//! Every table is a pure function of square indices, built by a `const fn`
//! at compile time. Nothing here looks at a board.

use crate::Bitboard;
use movegen_core::{Color, Square};

/// One of the eight compass directions a slider can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
    NorthEast = 4,
    NorthWest = 5,
    SouthEast = 6,
    SouthWest = 7,
}

/// Which set bit of a ray is closest to the ray's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockerOrder {
    /// The ray walks toward higher square indices.
    Lowest,
    /// The ray walks toward lower square indices.
    Highest,
}

/// Geometry class of a ray, deciding which sliders move along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayClass {
    /// Ranks and files: rooks and queens.
    Orthogonal,
    /// Diagonals: bishops and queens.
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Step as (file delta, rank delta).
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// North, east, north-east and north-west rays climb in index order;
    /// the other four descend.
    #[inline]
    pub const fn blocker_order(self) -> BlockerOrder {
        match self {
            Direction::North | Direction::East | Direction::NorthEast | Direction::NorthWest => {
                BlockerOrder::Lowest
            }
            Direction::South | Direction::West | Direction::SouthEast | Direction::SouthWest => {
                BlockerOrder::Highest
            }
        }
    }

    #[inline]
    pub const fn class(self) -> RayClass {
        match self {
            Direction::North | Direction::South | Direction::East | Direction::West => {
                RayClass::Orthogonal
            }
            _ => RayClass::Diagonal,
        }
    }

    /// The member of `squares` nearest the origin of a ray in this direction.
    ///
    /// `squares` is expected to be a subset of one such ray.
    #[inline]
    pub const fn nearest(self, squares: Bitboard) -> Option<Square> {
        match self.blocker_order() {
            BlockerOrder::Lowest => squares.lsb(),
            BlockerOrder::Highest => squares.msb(),
        }
    }
}

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (1, -2),
    (-1, -2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

const KNIGHT_ATTACKS: [Bitboard; 64] = compute_step_table(&KNIGHT_STEPS);
const KING_ATTACKS: [Bitboard; 64] = compute_step_table(&KING_STEPS);
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();
const PAWN_PUSHES: [[Bitboard; 64]; 2] = compute_pawn_pushes();
const PAWN_DOUBLE_PUSHES: [[Bitboard; 64]; 2] = compute_pawn_double_pushes();
const RAYS: [[Bitboard; 64]; 8] = compute_rays();
const BETWEEN: [[Bitboard; 64]; 64] = compute_between();

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Squares a pawn of `color` on `sq` captures on.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// The square one step ahead of a pawn of `color` on `sq`.
#[inline]
pub fn pawn_push(sq: Square, color: Color) -> Bitboard {
    PAWN_PUSHES[color.index()][sq.index() as usize]
}

/// The square two steps ahead, only defined on the pawn's starting rank.
#[inline]
pub fn pawn_double_push(sq: Square, color: Color) -> Bitboard {
    PAWN_DOUBLE_PUSHES[color.index()][sq.index() as usize]
}

/// Unobstructed ray from `sq` (exclusive) to the board edge.
#[inline]
pub fn ray(sq: Square, direction: Direction) -> Bitboard {
    RAYS[direction.index()][sq.index() as usize]
}

/// Squares strictly between `a` and `b`.
///
/// Empty when the two squares share no rank, file or diagonal, when they
/// are adjacent, and when they are equal.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index() as usize][b.index() as usize]
}

const fn compute_step_table(steps: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut index = 0u8;
    while index < 64 {
        let from = Square::nth(index);
        let mut bits = 0u64;
        let mut i = 0;
        while i < steps.len() {
            if let Some(to) = from.offset(steps[i].0, steps[i].1) {
                bits |= to.bit();
            }
            i += 1;
        }
        table[index as usize] = Bitboard(bits);
        index += 1;
    }
    table
}

const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut index = 0u8;
    while index < 64 {
        let from = Square::nth(index);
        let mut side = 0;
        while side < 2 {
            let forward = if side == 0 { 1 } else { -1 };
            let mut bits = 0u64;
            if let Some(to) = from.offset(-1, forward) {
                bits |= to.bit();
            }
            if let Some(to) = from.offset(1, forward) {
                bits |= to.bit();
            }
            table[side][index as usize] = Bitboard(bits);
            side += 1;
        }
        index += 1;
    }
    table
}

const fn compute_pawn_pushes() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut index = 0u8;
    while index < 64 {
        let from = Square::nth(index);
        if let Some(to) = from.offset(0, 1) {
            table[0][index as usize] = Bitboard(to.bit());
        }
        if let Some(to) = from.offset(0, -1) {
            table[1][index as usize] = Bitboard(to.bit());
        }
        index += 1;
    }
    table
}

const fn compute_pawn_double_pushes() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut side = 0;
    while side < 2 {
        let color = Color::ALL[side];
        let start = color.pawn_rank().index() * 8;
        let mut file = 0u8;
        while file < 8 {
            let from = start + file;
            let to = (from as i8 + 2 * color.forward()) as u8;
            table[side][from as usize] = Bitboard(1u64 << to);
            file += 1;
        }
        side += 1;
    }
    table
}

const fn compute_rays() -> [[Bitboard; 64]; 8] {
    let mut table = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = Direction::ALL[dir].step();
        let mut index = 0u8;
        while index < 64 {
            let mut bits = 0u64;
            let mut cursor = Square::nth(index).offset(df, dr);
            while let Some(sq) = cursor {
                bits |= sq.bit();
                cursor = sq.offset(df, dr);
            }
            table[dir][index as usize] = Bitboard(bits);
            index += 1;
        }
        dir += 1;
    }
    table
}

const fn compute_between() -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut index = 0u8;
    while index < 64 {
        let mut dir = 0;
        while dir < 8 {
            let (df, dr) = Direction::ALL[dir].step();
            let mut passed = 0u64;
            let mut cursor = Square::nth(index).offset(df, dr);
            while let Some(sq) = cursor {
                table[index as usize][sq.index() as usize] = Bitboard(passed);
                passed |= sq.bit();
                cursor = sq.offset(df, dr);
            }
            dir += 1;
        }
        index += 1;
    }
    table
}
