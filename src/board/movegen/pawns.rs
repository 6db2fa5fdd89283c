//! Pawn move generation.

use super::super::attack_tables::{PAWN_ATTACKS, PAWN_DOUBLE_PUSHES, PAWN_PUSHES};
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Board {
    /// Single pushes, double pushes, and push-promotions.
    pub(crate) fn pawn_pushes(&self, color: Color, moves: &mut MoveList) {
        let c_idx = color.index();
        let promotion_rank = match color {
            Color::White => 7,
            Color::Black => 0,
        };

        for from in self.pieces[c_idx][Piece::Pawn.index()].iter() {
            let push = Bitboard(PAWN_PUSHES[c_idx][from.index()]) & !self.all_occupied;
            let Some(to) = push.lsb() else { continue };

            if to.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::promotion(from, to, promo));
                }
            } else {
                moves.push(Move::quiet(from, to));
                // the double push requires the single-push square to be free
                let double =
                    Bitboard(PAWN_DOUBLE_PUSHES[c_idx][from.index()]) & !self.all_occupied;
                if let Some(to2) = double.lsb() {
                    moves.push(Move::double_push(from, to2));
                }
            }
        }
    }

    /// Diagonal captures, capture-promotions, and en passant.
    pub(crate) fn pawn_captures(&self, color: Color, moves: &mut MoveList) {
        let c_idx = color.index();
        let opponent_occ = self.occupied[color.opponent().index()];
        let promotion_rank = match color {
            Color::White => 7,
            Color::Black => 0,
        };

        for from in self.pieces[c_idx][Piece::Pawn.index()].iter() {
            let attacks = Bitboard(PAWN_ATTACKS[c_idx][from.index()]);

            for to in (attacks & opponent_occ).iter() {
                if to.rank() == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::promotion_capture(from, to, promo));
                    }
                } else {
                    moves.push(Move::capture(from, to));
                }
            }

            if let Some(ep) = self.ep_target {
                if attacks.contains(ep) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    /// The square of the pawn captured by an en-passant move to `ep_square`.
    #[inline]
    pub(crate) fn ep_captured_square(ep_square: Square, mover: Color) -> Square {
        ep_square.shifted(-mover.push_delta())
    }
}
