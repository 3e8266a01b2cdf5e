//! FEN (Forsyth-Edwards Notation) records.
//!
//! [`Fen`] is the typed form of a FEN string: a square-indexed placement
//! plus the five state fields. Boards are built from it and printed back
//! through it.

use crate::{CastlingRights, Color, ColoredPiece, PieceError, Rank, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a FEN string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error(transparent)]
    Piece(#[from] PieceError),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece on each square, indexed by [`Square::index`].
    pub placement: [Option<ColoredPiece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// The two clock fields may be omitted, in which case they default to
    /// `0` and `1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 && parts.len() != 4 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;
        let en_passant = parse_en_passant(parts[3])?;

        let (halfmove_clock, fullmove_number) = if parts.len() == 6 {
            let halfmove = parts[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
            let fullmove = parts[5]
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn placement_field(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in Rank::ALL.iter().rev() {
            let mut gap = 0u8;
            for index in rank.index() * 8..rank.index() * 8 + 8 {
                match self.placement[index as usize] {
                    Some(piece) => {
                        if gap > 0 {
                            out.push((b'0' + gap) as char);
                            gap = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push((b'0' + gap) as char);
            }
            if *rank != Rank::R1 {
                out.push('/');
            }
        }
        out
    }
}

fn parse_placement(field: &str) -> Result<[Option<ColoredPiece>; 64], FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placement = [None; 64];
    for (row, text) in rows.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "bad empty-square count '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                file += skip as u8;
            } else {
                let piece = ColoredPiece::try_from(c)?;
                if file < 8 {
                    placement[(rank * 8 + file) as usize] = Some(piece);
                }
                file += 1;
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                rank + 1,
                file
            )));
        }
    }
    Ok(placement)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(CastlingRights::NONE);
    }
    let mut flags = 0u8;
    for c in field.chars() {
        let flag = match c {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )))
            }
        };
        if flags & flag != 0 {
            return Err(FenError::InvalidCastlingRights(format!(
                "duplicate flag '{}'",
                c
            )));
        }
        flags |= flag;
    }
    Ok(CastlingRights::new(flags))
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    match Square::from_algebraic(field) {
        Some(sq) if sq.rank() == Rank::R3 || sq.rank() == Rank::R6 => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
    }
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement_field(),
            self.side_to_move.to_fen_char(),
            self.castling.to_fen(),
            self.en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic()),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
