//! Knight move generation.

use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece};

impl Board {
    pub(crate) fn knight_moves(&self, color: Color, moves: &mut MoveList) {
        self.knight_moves_filtered(color, false, moves);
    }

    pub(crate) fn knight_moves_filtered(
        &self,
        color: Color,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        let own_occ = self.occupied[color.index()];
        let opponent_occ = self.occupied[color.opponent().index()];

        for from in self.pieces[color.index()][Piece::Knight.index()].iter() {
            let mut targets = Bitboard(KNIGHT_ATTACKS[from.index()]) & !own_occ;
            if captures_only {
                targets &= opponent_occ;
            }
            for to in targets.iter() {
                if opponent_occ.contains(to) {
                    moves.push(Move::capture(from, to));
                } else {
                    moves.push(Move::quiet(from, to));
                }
            }
        }
    }
}
