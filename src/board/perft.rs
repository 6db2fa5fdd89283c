//! Perft: legal move-tree node counting for move generator validation.

use super::{Board, Move};

impl Board {
    /// Count leaf nodes of the legal move tree to the given depth.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        let mut nodes = 0;
        for &mv in &moves {
            if !self.make_move(mv) {
                continue;
            }
            nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
            self.unmake_move();
        }
        nodes
    }

    /// Per-root-move perft breakdown, useful when hunting generator bugs.
    #[must_use]
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let moves = self.generate_moves();
        let mut results = Vec::with_capacity(moves.len());
        for &mv in &moves {
            if !self.make_move(mv) {
                continue;
            }
            let nodes = if depth <= 1 { 1 } else { self.perft(depth - 1) };
            self.unmake_move();
            results.push((mv, nodes));
        }
        results
    }
}
