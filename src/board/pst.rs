//! Material values and piece-square tables.
//!
//! Tables are written visually, first row = rank 8, so White indexes them
//! through a vertical mirror and Black directly.

use super::{Color, Piece, Square};

/// Centipawn material values indexed by `Piece::index()`.
pub(crate) const MATERIAL: [i32; 6] = [100, 320, 330, 500, 900, 20000];

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const TABLES: [&[i32; 64]; 6] = [
    &PAWN_TABLE,
    &KNIGHT_TABLE,
    &BISHOP_TABLE,
    &ROOK_TABLE,
    &QUEEN_TABLE,
    &KING_TABLE,
];

/// Piece-square value for a piece of `color` on `sq`.
#[inline]
pub(crate) fn pst_value(piece: Piece, color: Color, sq: Square) -> i32 {
    let oriented = match color {
        Color::White => sq.mirror().index(),
        Color::Black => sq.index(),
    };
    TABLES[piece.index()][oriented]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pst_is_color_symmetric() {
        // a white piece on e4 scores like a black piece on e5
        let e4 = Square::new(3, 4);
        let e5 = Square::new(4, 4);
        for p_idx in 0..6 {
            let piece = Piece::from_index(p_idx);
            assert_eq!(
                pst_value(piece, Color::White, e4),
                pst_value(piece, Color::Black, e5)
            );
        }
    }

    #[test]
    fn central_knight_beats_corner_knight() {
        let a1 = Square::new(0, 0);
        let e4 = Square::new(3, 4);
        assert!(pst_value(Piece::Knight, Color::White, e4) > pst_value(Piece::Knight, Color::White, a1));
    }

    #[test]
    fn advanced_white_pawn_scores_higher() {
        let e2 = Square::new(1, 4);
        let e7 = Square::new(6, 4);
        assert!(pst_value(Piece::Pawn, Color::White, e7) > pst_value(Piece::Pawn, Color::White, e2));
    }
}
