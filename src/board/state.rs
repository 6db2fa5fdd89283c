//! The board state and its invariant helpers.

use crate::zobrist::ZOBRIST;

use super::{
    Bitboard, Color, Move, Piece, Square, ALL_CASTLING_RIGHTS,
};

/// Undo record pushed by `make_move`. Captures the move itself, what it
/// captured, and the full pre-move snapshot of the scalar state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    pub(crate) captured: Option<Piece>,
    pub(crate) ep_target: Option<Square>,
    pub(crate) castling_rights: u8,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_counter: u32,
    pub(crate) hash: u64,
}

/// The single game-state object.
///
/// Twelve piece bitboards plus per-side and total occupancy, scalar game
/// state, an incrementally maintained Zobrist hash, and an undo stack that
/// owns no references into the rest of the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; Piece::COUNT]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) ep_target: Option<Square>,
    pub(crate) castling_rights: u8,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_counter: u32,
    pub(crate) hash: u64,
    pub(crate) history: Vec<Undo>,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            board.set_piece(Square::new(0, file), Color::White, piece);
            board.set_piece(Square::new(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::new(6, file), Color::Black, Piece::Pawn);
            board.set_piece(Square::new(7, file), Color::Black, piece);
        }
        board.castling_rights = ALL_CASTLING_RIGHTS;
        board.fullmove_counter = 1;
        board.hash = board.compute_hash();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; Piece::COUNT]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            ep_target: None,
            castling_rights: 0,
            halfmove_clock: 0,
            fullmove_counter: 1,
            hash: 0,
            history: Vec::with_capacity(64),
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_counter(&self) -> u32 {
        self.fullmove_counter
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> u8 {
        self.castling_rights
    }

    /// Number of moves made and not yet unmade since this board was built.
    #[inline]
    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= !bit;
        self.occupied[color.index()] &= !bit;
        self.all_occupied &= !bit;
    }

    #[inline]
    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        !self.all_occupied.contains(sq)
    }

    /// The piece and its color on a square, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        for p_idx in 0..Piece::COUNT {
            if self.pieces[color.index()][p_idx].contains(sq) {
                return Some((color, Piece::from_index(p_idx)));
            }
        }
        None
    }

    /// Just the piece kind on a square.
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// The king square of `color`. Every reachable position has one.
    #[inline]
    #[must_use]
    pub(crate) fn king_square(&self, color: Color) -> Square {
        debug_assert!(self.pieces[color.index()][Piece::King.index()].is_single());
        self.pieces[color.index()][Piece::King.index()]
            .lsb()
            .unwrap_or(Square::from_index(0))
    }

    /// Full Zobrist recomputation; `hash` must always equal this.
    #[must_use]
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in [Color::White, Color::Black] {
            for p_idx in 0..Piece::COUNT {
                let piece = Piece::from_index(p_idx);
                for sq in self.pieces[color.index()][p_idx].iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_key;
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        if let Some(ep) = self.ep_target {
            hash ^= ZOBRIST.ep_file_keys[ep.file()];
        }
        hash
    }

    /// How often the current position has occurred, counting this one.
    ///
    /// The undo stack snapshots the hash of the position each move was made
    /// from, so prior occurrences of the current position are exactly the
    /// matching snapshots.
    #[must_use]
    pub(crate) fn repetition_count(&self) -> u32 {
        let mut count = 1;
        for undo in &self.history {
            if undo.hash == self.hash {
                count += 1;
            }
        }
        count
    }

    /// Draw by the fifty-move rule or threefold repetition.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100 || self.repetition_count() >= 3
    }

    /// Invariant checks run after make/unmake in debug builds. The hash
    /// recomputation invariant is cross-checked by tests instead, since a
    /// full recomputation per node would dominate perft runs.
    #[inline]
    pub(crate) fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            for color in [Color::White, Color::Black] {
                let mut union = Bitboard::EMPTY;
                for bb in self.pieces[color.index()] {
                    debug_assert!(!union.intersects(bb), "piece masks overlap for {color}");
                    union |= bb;
                }
                debug_assert_eq!(
                    union,
                    self.occupied[color.index()],
                    "occupancy out of sync for {color}"
                );
                debug_assert!(
                    self.pieces[color.index()][Piece::King.index()].is_single(),
                    "{color} must have exactly one king"
                );
            }
            debug_assert_eq!(
                self.all_occupied,
                self.occupied[0] | self.occupied[1],
                "total occupancy out of sync"
            );
            if let Some(ep) = self.ep_target {
                debug_assert!(
                    ep.rank() == 2 || ep.rank() == 5,
                    "en passant target on rank {}",
                    ep.rank() + 1
                );
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
