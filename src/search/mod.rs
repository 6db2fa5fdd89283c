//! Iterative-deepening principal-variation search.
//!
//! The searcher owns no global state: everything mutable lives in
//! [`SearchState`] (transposition table, killers, history heuristic) and the
//! per-search [`SearchContext`]. Cancellation is cooperative through a shared
//! atomic flag polled between nodes.

mod alphabeta;
mod ordering;
mod quiescence;
pub mod time;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Move};
use crate::tt::TranspositionTable;

/// Search tree depth ceiling, in plies.
pub const MAX_PLY: usize = 64;

/// Alpha-beta window bound.
pub const SCORE_INFINITE: i32 = 32_000;

/// Score of a mate at the root; a mate at ply `p` scores `MATE_SCORE - p`.
pub const MATE_SCORE: i32 = 31_000;

/// Scores at or beyond this magnitude are mate scores.
pub const MATE_BOUND: i32 = 30_000;

/// Default transposition table size in megabytes.
pub const DEFAULT_TT_MB: usize = 256;

/// Search state that persists between searches: the transposition table and
/// the move-ordering heuristics.
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    /// Two killer slots per ply.
    pub(crate) killers: [[Move; 2]; MAX_PLY],
    /// History heuristic counters indexed by (side, from, to).
    pub(crate) history: [[[i32; 64]; 64]; 2],
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_mb),
            killers: [[Move::NONE; 2]; MAX_PLY],
            history: [[[0; 64]; 64]; 2],
        }
    }

    /// Forget killers and history, e.g. on `ucinewgame`.
    pub fn reset_heuristics(&mut self) {
        self.killers = [[Move::NONE; 2]; MAX_PLY];
        self.history = [[[0; 64]; 64]; 2];
    }

    /// Replace the transposition table with a freshly sized one.
    pub fn resize_tt(&mut self, tt_mb: usize) {
        self.tt = TranspositionTable::new(tt_mb);
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_MB)
    }
}

/// Root limits, computed once from the `go` parameters.
#[derive(Default, Clone)]
pub struct SearchLimits {
    /// Maximum iteration depth; `None` iterates to [`MAX_PLY`].
    pub depth: Option<u32>,
    /// Node budget.
    pub nodes: Option<u64>,
    /// Wall-clock budget; `None` is unbounded.
    pub budget: Option<Duration>,
    /// `go infinite` / `go ponder`: ignore the clock entirely.
    pub infinite: bool,
    /// Restrict the root to these moves (UCI `searchmoves`); empty = all.
    pub root_moves: Vec<Move>,
}

/// Snapshot reported after each completed iteration.
#[derive(Debug, Clone)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: Vec<Move>,
}

pub(crate) struct SearchContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) state: &'a mut SearchState,
    pub(crate) limits: &'a SearchLimits,
    pub(crate) stop: &'a AtomicBool,
    pub(crate) start: Instant,
    pub(crate) nodes: u64,
    /// Triangular PV buffers: `pv_table[p]` holds the line found at ply `p`.
    pub(crate) pv_table: [[Move; MAX_PLY]; MAX_PLY],
    pub(crate) pv_length: [usize; MAX_PLY],
}

impl SearchContext<'_> {
    #[inline]
    pub(crate) fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Set the stop flag when the node budget or the clock is exhausted.
    /// Elapsed time is only sampled every 1024 nodes.
    pub(crate) fn poll_budget(&self) {
        if self.stopped() {
            return;
        }
        if let Some(limit) = self.limits.nodes {
            if self.nodes >= limit {
                self.stop.store(true, Ordering::Relaxed);
                return;
            }
        }
        if self.limits.infinite {
            return;
        }
        if let Some(budget) = self.limits.budget {
            if self.nodes % 1024 == 0 && self.start.elapsed() >= budget {
                self.stop.store(true, Ordering::Relaxed);
            }
        }
    }
}

/// Run an iterative-deepening search and return the best move.
///
/// `on_iteration` fires after every completed depth with the committed PV;
/// a stopped iteration is discarded and the previous depth's result stands.
pub fn search_best_move(
    board: &mut Board,
    state: &mut SearchState,
    limits: &SearchLimits,
    stop: &AtomicBool,
    mut on_iteration: impl FnMut(&SearchInfo),
) -> Option<Move> {
    let max_depth = limits
        .depth
        .unwrap_or(MAX_PLY as u32 - 1)
        .clamp(1, MAX_PLY as u32 - 1);

    let mut ctx = SearchContext {
        board,
        state,
        limits,
        stop,
        start: Instant::now(),
        nodes: 0,
        pv_table: [[Move::NONE; MAX_PLY]; MAX_PLY],
        pv_length: [0; MAX_PLY],
    };

    let mut root_pv: Vec<Move> = Vec::new();

    for depth in 1..=max_depth {
        ctx.pv_length = [0; MAX_PLY];
        let score = ctx.pvs(depth, -SCORE_INFINITE, SCORE_INFINITE, 0, true);

        ctx.poll_budget();
        if ctx.stopped() {
            debug!("search stopped during depth {depth}");
            break;
        }

        // An empty PV after a completed iteration means the root itself is
        // mated or stalemated; there is nothing to commit.
        if ctx.pv_length[0] == 0 {
            break;
        }
        root_pv = ctx.pv_table[0][..ctx.pv_length[0]].to_vec();

        on_iteration(&SearchInfo {
            depth,
            score,
            nodes: ctx.nodes,
            elapsed: ctx.start.elapsed(),
            pv: root_pv.clone(),
        });

        // A proven mate cannot be improved by deeper iterations.
        if score.abs() >= MATE_BOUND {
            break;
        }

        // between iterations the clock is checked unconditionally
        if !limits.infinite {
            if let Some(budget) = limits.budget {
                if ctx.start.elapsed() >= budget {
                    break;
                }
            }
        }
    }

    root_pv
        .first()
        .copied()
        .or_else(|| first_legal_move(ctx.board, limits))
}

/// Fallback when the search was stopped before depth 1 completed.
fn first_legal_move(board: &mut Board, limits: &SearchLimits) -> Option<Move> {
    let moves = board.generate_moves();
    for &mv in &moves {
        if !limits.root_moves.is_empty() && !limits.root_moves.contains(&mv) {
            continue;
        }
        if board.make_move(mv) {
            board.unmake_move();
            return Some(mv);
        }
    }
    None
}
