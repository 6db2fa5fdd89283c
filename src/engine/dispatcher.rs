//! The command dispatcher.
//!
//! Three threads share one bounded message queue:
//!
//! 1. the protocol reader turns stdin lines into typed commands,
//! 2. the dispatcher owns the single `Board` and the search state, consumes
//!    messages, and serializes every output line,
//! 3. a search worker, spawned per `go`, reads a clone of the board and
//!    reports `Info`/`Done` back through the queue.
//!
//! The dispatcher never mutates the board while a worker is alive: every
//! mutating command first runs [`Engine::finish_search`]. `bestmove` is
//! always printed after the worker's final `info` line because both travel
//! through the same FIFO queue.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::board::{Board, Move};
use crate::search::{
    self, SearchInfo, SearchLimits, SearchState, MATE_BOUND, MATE_SCORE,
};
use crate::sync::{MessageQueue, PushError};
use crate::uci::{parse_uci_command, GoParams, UciCommand};

use super::options::{EngineOptions, OptionAction};

const ENGINE_NAME: &str = "Pyrite";
const ENGINE_AUTHOR: &str = "the Pyrite developers";

/// Capacity of the engine's message queue.
const QUEUE_CAPACITY: usize = 32;

/// Message reported by the search worker.
#[derive(Debug, Clone)]
pub enum SearchReport {
    /// One completed iteration.
    Info(SearchInfo),
    /// The search finished or was stopped; carries the best move.
    Done(Option<Move>),
}

/// Everything that flows through the engine queue.
#[derive(Debug, Clone)]
pub enum EngineMessage {
    Command(UciCommand),
    Report(SearchReport),
}

/// A running search worker.
struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// The dispatcher: exclusive owner of the board between searches.
pub struct Engine {
    board: Board,
    state: Arc<Mutex<SearchState>>,
    options: EngineOptions,
    queue: Arc<MessageQueue<EngineMessage>>,
    job: Option<SearchJob>,
    /// Commands set aside while draining reports in `finish_search`.
    pending: VecDeque<UciCommand>,
}

impl Engine {
    #[must_use]
    pub fn new(queue: Arc<MessageQueue<EngineMessage>>) -> Self {
        let options = EngineOptions::new();
        Engine {
            board: Board::new(),
            state: Arc::new(Mutex::new(SearchState::new(options.hash_mb))),
            options,
            queue,
            job: None,
            pending: VecDeque::new(),
        }
    }

    /// Consume messages until `quit`.
    pub fn run(&mut self) {
        loop {
            let msg = match self.pending.pop_front() {
                Some(cmd) => EngineMessage::Command(cmd),
                None => match self.queue.pop() {
                    Some(msg) => msg,
                    None => break,
                },
            };
            match msg {
                EngineMessage::Command(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                }
                EngineMessage::Report(report) => self.handle_report(report),
            }
        }
        self.finish_search();
    }

    /// Handle one command; returns `true` on `quit`.
    fn handle_command(&mut self, cmd: UciCommand) -> bool {
        match cmd {
            UciCommand::Uci => {
                println!("id name {ENGINE_NAME}");
                println!("id author {ENGINE_AUTHOR}");
                self.options.print_declarations();
                println!("uciok");
            }
            UciCommand::IsReady => println!("readyok"),
            UciCommand::UciNewGame => self.new_game(),
            UciCommand::Position { fen, moves } => self.set_position(fen.as_deref(), &moves),
            UciCommand::Go(params) => self.go(&params),
            UciCommand::Stop => {
                if let Some(job) = &self.job {
                    job.stop.store(true, Ordering::Relaxed);
                }
            }
            UciCommand::SetOption { name, value } => self.set_option(&name, value.as_deref()),
            UciCommand::Perft(depth) => {
                self.finish_search();
                let mut nodes = 0;
                for (mv, count) in self.board.perft_divide(depth) {
                    println!("{mv}: {count}");
                    nodes += count;
                }
                println!("nodes {nodes}");
            }
            UciCommand::Print => println!("{}", self.board),
            UciCommand::Quit => return true,
            UciCommand::Unknown(line) => {
                debug!("ignoring unknown command: {line}");
            }
        }
        false
    }

    fn handle_report(&mut self, report: SearchReport) {
        match report {
            SearchReport::Info(info) => print_info(&info),
            SearchReport::Done(best) => {
                print_bestmove(best);
                if let Some(job) = self.job.take() {
                    let _ = job.handle.join();
                }
            }
        }
    }

    /// Stop the active worker and surface its queued reports so `bestmove`
    /// still lands in order. The queue keeps draining while waiting, so the
    /// worker can never block on a full queue; commands that arrive in the
    /// meantime are replayed afterwards.
    fn finish_search(&mut self) {
        let Some(job) = self.job.take() else {
            return;
        };
        job.stop.store(true, Ordering::Relaxed);

        loop {
            match self.queue.pop_timeout(Duration::from_millis(50)) {
                Ok(EngineMessage::Report(SearchReport::Info(info))) => print_info(&info),
                Ok(EngineMessage::Report(SearchReport::Done(best))) => {
                    print_bestmove(best);
                    break;
                }
                Ok(EngineMessage::Command(cmd)) => self.pending.push_back(cmd),
                Err(_) => {
                    // Done can only be missing if the worker's push failed
                    // because the queue was closed during shutdown.
                    if job.handle.is_finished() && self.queue.is_empty() {
                        break;
                    }
                    thread::sleep(Duration::from_millis(1));
                }
            }
        }
        let _ = job.handle.join();
    }

    fn new_game(&mut self) {
        self.finish_search();
        self.board = Board::new();
        let mut state = self.state.lock();
        state.clear_tt();
        state.reset_heuristics();
    }

    fn set_position(&mut self, fen: Option<&str>, moves: &[String]) {
        self.finish_search();

        let board = match fen {
            None => Board::new(),
            Some(fen) => match Board::try_from_fen(fen) {
                Ok(board) => board,
                Err(e) => {
                    println!("info string invalid position: {e}");
                    return;
                }
            },
        };
        self.board = board;

        for mv_str in moves {
            match self.board.make_move_uci(mv_str) {
                Ok(_) => {}
                Err(e) => {
                    // skip this and every following move of the line
                    println!("info string {e}");
                    warn!("dropping move list tail at '{mv_str}': {e}");
                    break;
                }
            }
        }
    }

    fn set_option(&mut self, name: &str, value: Option<&str>) {
        self.finish_search();
        match self.options.apply(name, value) {
            Ok(OptionAction::ResizeHash(mb)) => self.state.lock().resize_tt(mb),
            Ok(OptionAction::None) => {}
            Err(e) => println!("info string {e}"),
        }
    }

    /// Translate the `go` parameters into search limits and start a worker.
    fn go(&mut self, params: &GoParams) {
        self.finish_search();

        let (remaining, increment) = match self.board.side_to_move() {
            crate::board::Color::White => (params.wtime, params.winc),
            crate::board::Color::Black => (params.btime, params.binc),
        };

        // pondering is treated as an infinite search in this core
        let unbounded = params.infinite || params.ponder;
        let budget = if unbounded {
            None
        } else {
            search::time::allocate(params.movetime, remaining, increment, params.movestogo)
        };

        let mut root_moves = Vec::new();
        for token in &params.searchmoves {
            match self.board.parse_move(token) {
                Ok(mv) => root_moves.push(mv),
                Err(e) => println!("info string ignoring searchmove '{token}': {e}"),
            }
        }

        let limits = SearchLimits {
            depth: params.depth.or(params.mate.map(|m| 2 * m)),
            nodes: params.nodes,
            budget,
            infinite: unbounded,
            root_moves,
        };

        let stop = Arc::new(AtomicBool::new(false));
        let mut board = self.board.clone();
        let state = Arc::clone(&self.state);
        let queue = Arc::clone(&self.queue);
        let worker_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("search".to_string())
            .spawn(move || {
                let mut state = state.lock();
                let report_queue = Arc::clone(&queue);
                let best = search::search_best_move(
                    &mut board,
                    &mut state,
                    &limits,
                    &worker_stop,
                    |info| {
                        // a closed queue means the engine is quitting
                        let _ = report_queue
                            .push(EngineMessage::Report(SearchReport::Info(info.clone())));
                    },
                );
                let _ = queue.push(EngineMessage::Report(SearchReport::Done(best)));
            })
            .expect("failed to spawn search thread");

        self.job = Some(SearchJob { stop, handle });
    }
}

fn print_info(info: &SearchInfo) {
    let millis = info.elapsed.as_millis() as u64;
    let score = if info.score.abs() >= MATE_BOUND {
        let mate_in = (MATE_SCORE - info.score.abs() + 1) / 2;
        format!("mate {}", if info.score > 0 { mate_in } else { -mate_in })
    } else {
        format!("cp {}", info.score)
    };
    let pv: Vec<String> = info.pv.iter().map(Move::to_string).collect();
    println!(
        "info depth {} score {} nodes {} time {} pv {}",
        info.depth,
        score,
        info.nodes,
        millis,
        pv.join(" ")
    );
}

fn print_bestmove(best: Option<Move>) {
    match best {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove 0000"),
    }
}

/// Spawn the protocol reader: stdin lines become queued commands. The
/// thread exits after forwarding `quit` (or on end of input, which is
/// reported as `quit` so the engine shuts down cleanly).
fn spawn_reader(queue: Arc<MessageQueue<EngineMessage>>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("uci-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let Some(cmd) = parse_uci_command(&line) else {
                    continue;
                };
                let quit = cmd == UciCommand::Quit;
                if queue.push(EngineMessage::Command(cmd)).is_err() {
                    break;
                }
                if quit {
                    return;
                }
            }
            // end of input: make sure the dispatcher wakes up and exits
            let mut msg = EngineMessage::Command(UciCommand::Quit);
            loop {
                match queue.push_timeout(msg, Duration::from_millis(100)) {
                    Ok(()) | Err(PushError::Closed(_)) => break,
                    Err(PushError::Full(m) | PushError::Timeout(m)) => msg = m,
                }
            }
        })
        .expect("failed to spawn reader thread")
}

/// Engine entry point: wires the reader, runs the dispatcher on the calling
/// thread, and returns the process exit code.
pub fn run() -> i32 {
    let queue = Arc::new(MessageQueue::new(QUEUE_CAPACITY));
    let reader = spawn_reader(Arc::clone(&queue));

    let mut engine = Engine::new(Arc::clone(&queue));
    engine.run();

    queue.close();
    let _ = reader.join();
    0
}
