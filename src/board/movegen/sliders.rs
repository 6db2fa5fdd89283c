//! Bishop, rook, and queen move generation.

use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece};

impl Board {
    pub(crate) fn slider_moves(&self, color: Color, piece: Piece, moves: &mut MoveList) {
        self.slider_moves_filtered(color, piece, false, moves);
    }

    pub(crate) fn slider_moves_filtered(
        &self,
        color: Color,
        piece: Piece,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        debug_assert!(matches!(piece, Piece::Bishop | Piece::Rook | Piece::Queen));
        let own_occ = self.occupied[color.index()];
        let opponent_occ = self.occupied[color.opponent().index()];
        let occ = self.all_occupied.0;

        for from in self.pieces[color.index()][piece.index()].iter() {
            let raw = match piece {
                Piece::Bishop => bishop_attacks(from.index(), occ),
                Piece::Rook => rook_attacks(from.index(), occ),
                _ => queen_attacks(from.index(), occ),
            };
            let mut targets = Bitboard(raw) & !own_occ;
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
