//! Error types for board operations.

use std::fmt;

/// FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN must have exactly six space-separated fields.
    WrongFieldCount { found: usize },
    /// Piece placement must have exactly eight ranks.
    WrongRankCount { found: usize },
    /// A rank's piece letters and empty-run digits must cover eight files.
    BadRankWidth { rank: usize, files: usize },
    /// Unknown piece letter.
    InvalidPiece { ch: char },
    /// Active color must be `w` or `b`.
    InvalidSideToMove { found: String },
    /// Castling field may only contain a `KQkq` subset or `-`.
    InvalidCastling { ch: char },
    /// En-passant field must be an algebraic square on rank 3 or 6, or `-`.
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number out of range or not a number.
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN must have 6 fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::BadRankWidth { rank, files } => {
                write!(f, "rank {rank} covers {files} files instead of 8")
            }
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}'"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { ch } => write!(f, "invalid castling character '{ch}'"),
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => write!(f, "invalid move counter '{found}'"),
        }
    }
}

impl std::error::Error for FenError {}

/// Move string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move strings are 4 or 5 characters.
    InvalidLength { len: usize },
    /// Bad file or rank character.
    InvalidSquare { notation: String },
    /// Promotion letter must be one of q, r, b, n.
    InvalidPromotion { ch: char },
    /// The move does not match any legal move in the position.
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in '{notation}'")
            }
            MoveParseError::InvalidPromotion { ch } => {
                write!(f, "invalid promotion piece '{ch}'")
            }
            MoveParseError::IllegalMove { notation } => write!(f, "illegal move '{notation}'"),
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Square notation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
