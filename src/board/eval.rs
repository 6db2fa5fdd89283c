//! Static evaluation: material plus piece-square tables, from the
//! perspective of the side to move.

use super::pst::{pst_value, MATERIAL};
use super::{Board, Color, Piece};

impl Board {
    /// Centipawn score of the position for the side to move.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let us = self.side_to_move;
        self.side_score(us) - self.side_score(us.opponent())
    }

    fn side_score(&self, color: Color) -> i32 {
        let mut score = 0;
        for p_idx in 0..Piece::COUNT {
            let piece = Piece::from_index(p_idx);
            let bb = self.pieces[color.index()][p_idx];
            score += bb.popcount() as i32 * MATERIAL[p_idx];
            for sq in bb.iter() {
                score += pst_value(piece, color, sq);
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(Board::new().evaluate(), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        // same position, opposite side to move
        let w = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");
        let b = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(w.evaluate(), -b.evaluate());
    }

    #[test]
    fn extra_queen_dominates() {
        let up = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(up.evaluate() > 800);
        let down = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
        assert!(down.evaluate() < -800);
    }
}
