//! Bitboard move generation and position mutation.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets with set algebra and bit scans
//! - [`attacks`] - compile-time lookup tables and ray-based sliding attacks
//! - [`check`] and [`pins`] - checkers, the check-resolution mask and absolute pins
//! - [`legal`] - the legal move pipeline and [`MoveList`]
//! - [`execution`] - moves as reversible effect lists
//! - [`Board`] and [`Position`] - piece placement, state, and undo history
//! - [`perft()`] - leaf-node counting for validation
//!
//! # Architecture
//!
//! Legal moves are produced directly rather than filtered by making each
//! pseudo-legal move. Before any piece is looked at, the generator computes
//! who is checking the king, which squares resolve that check, which
//! friendly pieces are pinned and along which line, and which squares the
//! enemy attacks. Each piece generator then reduces to intersections.
//!
//! # Example
//!
//! ```
//! use movegen::{perft, Position};
//!
//! let mut position = Position::startpos();
//! let moves = position.legal_moves().unwrap();
//! assert_eq!(moves.len(), 20);
//!
//! position.play("e2e4").unwrap();
//! position.play("e7e5").unwrap();
//! assert_eq!(perft(&mut position, 1).unwrap(), 29);
//!
//! position.revert_move();
//! position.revert_move();
//! assert!(!position.can_undo());
//! ```

pub mod attacks;
mod bitboard;
mod board;
pub mod check;
pub mod execution;
pub mod legal;
mod perft;
pub mod pins;
mod position;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, BoardError, BoardState};
pub use execution::{ExecutionError, MoveEffect, MoveExecution};
pub use legal::{can_capture_en_passant, generate_legal_moves, MoveList};
pub use perft::{perft, perft_divide};
pub use pins::{PinRay, PinResult};
pub use position::{Position, PositionError};
