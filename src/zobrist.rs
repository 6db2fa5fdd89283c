//! Zobrist hashing keys.
//!
//! One 64-bit key per (color, piece, square), one for the side to move, one
//! per castling-right bit, and one per en-passant file. The board XORs these
//! incrementally while making and unmaking moves.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    /// `piece_keys[color][piece][square]`
    pub(crate) piece_keys: [[[u64; 64]; Piece::COUNT]; 2],
    pub(crate) side_key: u64,
    /// Indexed by castling-right bit position (see `board::types::castling`).
    pub(crate) castling_keys: [u64; 4],
    /// Only the file of the en-passant target enters the hash.
    pub(crate) ep_file_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed keeps hashes reproducible across runs and tests.
        let mut rng = StdRng::seed_from_u64(0x5EED_CAFE_F00D_D1CE);
        let mut piece_keys = [[[0u64; 64]; Piece::COUNT]; 2];
        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let side_key = rng.gen();

        let mut castling_keys = [0u64; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut ep_file_keys = [0u64; 8];
        for key in &mut ep_file_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            side_key,
            castling_keys,
            ep_file_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    /// XOR of the castling subkeys for every set right bit.
    #[inline]
    pub(crate) fn castling(&self, rights: u8) -> u64 {
        let mut h = 0u64;
        for (bit, key) in self.castling_keys.iter().enumerate() {
            if rights & (1 << bit) != 0 {
                h ^= *key;
            }
        }
        h
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable() {
        let sq = Square::new(3, 4);
        let a = ZOBRIST.piece(Color::White, Piece::Knight, sq);
        let b = ZOBRIST.piece(Color::White, Piece::Knight, sq);
        assert_eq!(a, b);
        assert_ne!(a, ZOBRIST.piece(Color::Black, Piece::Knight, sq));
    }

    #[test]
    fn castling_xor_is_per_bit() {
        let all = ZOBRIST.castling(0b1111);
        let some = ZOBRIST.castling(0b0101);
        let rest = ZOBRIST.castling(0b1010);
        assert_eq!(all, some ^ rest);
        assert_eq!(ZOBRIST.castling(0), 0);
    }
}
