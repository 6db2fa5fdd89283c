//! End-to-end search behavior tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pyrite::board::Board;
use pyrite::search::{search_best_move, SearchLimits, SearchState, MATE_BOUND};

fn depth_limits(depth: u32) -> SearchLimits {
    SearchLimits {
        depth: Some(depth),
        ..SearchLimits::default()
    }
}

/// Run a depth-limited search, returning (best move, last reported score).
fn search_to_depth(fen: &str, depth: u32) -> (Option<String>, i32) {
    let mut board = Board::from_fen(fen);
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);
    let mut last_score = 0;

    let best = search_best_move(
        &mut board,
        &mut state,
        &depth_limits(depth),
        &stop,
        |info| last_score = info.score,
    );
    (best.map(|mv| mv.to_string()), last_score)
}

#[test]
fn finds_back_rank_mate() {
    let (best, score) = search_to_depth("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 4);
    assert_eq!(best.as_deref(), Some("a1a8"), "rook lift mates on the back rank");
    assert!(score >= MATE_BOUND, "mate must be scored as mate, got {score}");
}

#[test]
fn finds_scholars_mate_delivery() {
    let (best, _) = search_to_depth(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        4,
    );
    assert_eq!(best.as_deref(), Some("h5f7"), "Qxf7# is the only mating move");
}

#[test]
fn reports_monotone_iteration_depths() {
    let mut board = Board::new();
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);
    let mut depths = Vec::new();

    let best = search_best_move(&mut board, &mut state, &depth_limits(5), &stop, |info| {
        depths.push(info.depth);
        assert!(!info.pv.is_empty(), "every committed iteration carries a PV");
    });

    assert!(best.is_some());
    assert_eq!(depths, vec![1, 2, 3, 4, 5]);
}

#[test]
fn best_move_is_legal() {
    let (best, _) = search_to_depth(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        4,
    );
    let best = best.expect("a move must be found");

    let mut board = Board::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );
    assert!(board.make_move_uci(&best).is_ok(), "best move {best} must be legal");
}

#[test]
fn checkmated_position_returns_no_move() {
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3");
    assert!(board.is_checkmate());

    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);
    let best = search_best_move(&mut board, &mut state, &depth_limits(3), &stop, |_| {});
    assert!(best.is_none());
}

#[test]
fn fifty_move_draw_scores_zero_in_tree() {
    // any reply leads into a position with halfmove_clock >= 100
    let (best, score) = search_to_depth("8/8/8/8/8/5k2/7r/6K1 w - - 99 80", 4);
    assert!(best.is_some(), "a legal reply still exists");
    assert_eq!(score, 0, "the subtree is all draws");
}

#[test]
fn node_budget_stops_the_search() {
    let mut board = Board::new();
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);
    let limits = SearchLimits {
        nodes: Some(200),
        ..SearchLimits::default()
    };

    let best = search_best_move(&mut board, &mut state, &limits, &stop, |info| {
        assert!(info.nodes <= 400, "far exceeded the node budget: {}", info.nodes);
    });
    // even a truncated search yields a legal fallback move
    assert!(best.is_some());
    assert!(stop.load(Ordering::Relaxed), "budget exhaustion must set the stop flag");
}

#[test]
fn searchmoves_restricts_the_root() {
    let mut board = Board::new();
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);

    let restricted = board.parse_move("a2a3").unwrap();
    let limits = SearchLimits {
        depth: Some(3),
        root_moves: vec![restricted],
        ..SearchLimits::default()
    };

    let best = search_best_move(&mut board, &mut state, &limits, &stop, |_| {});
    assert_eq!(best, Some(restricted));
}

#[test]
fn external_stop_terminates_promptly() {
    let stop = Arc::new(AtomicBool::new(false));
    let worker_stop = Arc::clone(&stop);

    let handle = thread::spawn(move || {
        let mut board = Board::new();
        let mut state = SearchState::new(16);
        let limits = SearchLimits {
            infinite: true,
            ..SearchLimits::default()
        };
        search_best_move(&mut board, &mut state, &limits, &worker_stop, |_| {})
    });

    thread::sleep(Duration::from_millis(100));
    let posted = Instant::now();
    stop.store(true, Ordering::Relaxed);

    let best = handle.join().expect("search thread panicked");
    assert!(
        posted.elapsed() < Duration::from_secs(2),
        "stop must be observed within a poll interval"
    );
    assert!(best.is_some(), "a partial search still reports its best move");
}

#[test]
fn repeated_search_reuses_state() {
    // the same state object (TT, killers, history) serves consecutive searches
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);

    let mut board = Board::new();
    let first = search_best_move(&mut board, &mut state, &depth_limits(4), &stop, |_| {});
    assert!(first.is_some());

    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    let second = search_best_move(&mut board, &mut state, &depth_limits(4), &stop, |_| {});
    assert_eq!(second.map(|m| m.to_string()).as_deref(), Some("a1a8"));
}
