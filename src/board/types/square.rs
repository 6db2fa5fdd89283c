//! Board squares.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Index of a file character, `'a'` -> 0 .. `'h'` -> 7.
///
/// The caller must have validated the character range.
pub(crate) fn file_of_char(file: char) -> usize {
    file.to_ascii_lowercase() as usize - 'a' as usize
}

/// Index of a rank character, `'1'` -> 0 .. `'8'` -> 7.
pub(crate) fn rank_of_char(rank: char) -> usize {
    rank as usize - '1' as usize
}

/// A square on the board, stored as a 0-63 index with a1 = 0 and h8 = 63.
///
/// `Option<Square>` serves as the "no square" sentinel (for example the
/// en-passant target when no double push just happened).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Build a square from rank and file indices (both 0-7, unchecked).
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    /// Build a square from a 0-63 index.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// The 0-63 index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank index, 0 = rank 1.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// File index, 0 = file a.
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Mirror the square vertically (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn mirror(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// The square `delta` ranks toward the opponent of `color`.
    #[inline]
    #[must_use]
    pub(crate) const fn shifted(self, delta: i8) -> Self {
        Square((self.0 as i8 + delta) as u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file() as u8) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        };
        if !('a'..='h').contains(&file.to_ascii_lowercase()) || !('1'..='8').contains(&rank) {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        Ok(Square::new(rank_of_char(rank), file_of_char(file)))
    }
}
