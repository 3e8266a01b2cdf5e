//! Value types for bitboard move generation.
//!
//! This crate provides the plain data the generator consumes and produces:
//! - [`Color`], [`Piece`] and [`ColoredPiece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and [`MoveFlag`] for moves and their coordinate notation
//! - [`CastlingRights`] and [`CastleSide`] for castling state and geometry
//! - [`Fen`] for reading and writing positions

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveFlag};
pub use piece::{ColoredPiece, Piece, PieceError};
pub use square::{File, Rank, Square};
