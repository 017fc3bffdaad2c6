//! Game tree search for the computer player

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use std::sync::mpsc::{channel, Receiver, RecvError, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::board::{Board, Piece};
use crate::error::GameError;
use crate::heuristic::evaluate_board;
use crate::session::Difficulty;

/// Score of a position the computer has won
pub const WIN_SCORE: i32 = 1_000_000;
/// Score of a position the player has won
///
/// Smaller in magnitude than [`WIN_SCORE`], which makes the computer prefer
/// taking a win over delaying a loss.
pub const LOSS_SCORE: i32 = -100_000;
/// Score of a full board with no winner
pub const DRAW_SCORE: i32 = 0;

const MAX_SENTINEL: i32 = -100_000_000;
const MIN_SENTINEL: i32 = 100_000_000;

/// Initial score of the one-ply picker
const GREEDY_FLOOR: i32 = -100_000;

/// The outcome of a search at any level of the tree
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// The column to play, `None` when the searched position was a leaf
    pub column: Option<usize>,
    pub score: i32,
}

/// How the initial best column is picked before any child is searched
#[derive(Clone, Debug)]
pub enum Fallback {
    /// The lowest valid column
    FirstValid,
    /// A random valid column from a seeded generator
    Seeded(StdRng),
}

impl Fallback {
    pub fn seeded(seed: u64) -> Self {
        Fallback::Seeded(StdRng::seed_from_u64(seed))
    }

    /// An independent fallback for a worker, advancing this generator
    fn fork(&mut self) -> Self {
        match self {
            Fallback::FirstValid => Fallback::FirstValid,
            Fallback::Seeded(rng) => Fallback::seeded(rng.gen()),
        }
    }

    fn pick(&mut self, columns: &[usize]) -> Option<usize> {
        match self {
            Fallback::FirstValid => columns.first().copied(),
            Fallback::Seeded(rng) => columns.choose(rng).copied(),
        }
    }
}

/// A depth-limited minimax search with alpha-beta pruning
///
/// # Position Scoring
/// Scores are always from the computer's point of view. Terminal positions
/// score [`WIN_SCORE`], [`LOSS_SCORE`] or [`DRAW_SCORE`], positions at the
/// search horizon are scored by [`evaluate_board`] for the computer's piece.
#[derive(Clone, Debug)]
pub struct Searcher {
    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
    fallback: Fallback,
}

impl Searcher {
    /// Creates a `Searcher` that falls back to the lowest valid column
    pub fn new() -> Self {
        Self::with_fallback(Fallback::FirstValid)
    }

    pub fn with_fallback(fallback: Fallback) -> Self {
        Self {
            node_count: 0,
            fallback,
        }
    }

    /// Searches `depth` plies ahead with a full alpha-beta window
    pub fn search(&mut self, board: &Board, depth: u8, maximizing: bool) -> SearchResult {
        self.node_count = 0;
        let result = self.minimax(board, depth, 0, i32::MIN, i32::MAX, maximizing);
        debug!(
            "depth {} search: column {:?}, score {}, {} nodes",
            depth, result.column, result.score, self.node_count
        );
        result
    }

    /// Picks the computer's column at the difficulty's search depth
    pub fn choose_column(&mut self, board: &Board, difficulty: Difficulty) -> Result<usize, GameError> {
        self.pick_column(board, difficulty.depth())
    }

    /// Picks the computer's column searching `depth` plies
    ///
    /// A depth of zero would never look at a move and is rejected.
    pub fn pick_column(&mut self, board: &Board, depth: u8) -> Result<usize, GameError> {
        if depth == 0 {
            return Err(GameError::ZeroDepth);
        }
        if board.is_full() {
            return Err(GameError::NoValidColumns);
        }
        if board.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.search(board, depth, true)
            .column
            .ok_or(GameError::NoValidColumns)
    }

    /// Runs a search on a worker thread
    ///
    /// The board is copied into the worker, the result is delivered through
    /// the returned handle. A seeded fallback is reseeded from this searcher,
    /// so consecutive workers draw different columns.
    pub fn spawn(&mut self, board: Board, depth: u8, maximizing: bool) -> SearchHandle {
        let (tx, rx) = channel();
        let mut searcher = Searcher::with_fallback(self.fallback.fork());

        let worker = thread::spawn(move || {
            let result = searcher.search(&board, depth, maximizing);
            // the receiver may have been dropped if the game was abandoned
            let _ = tx.send(result);
        });

        SearchHandle {
            receiver: rx,
            worker: Some(worker),
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.node_count += 1;

        let valid_columns = board.valid_columns();

        if depth == 0 || board.is_terminal() {
            let score = if board.has_winning_line(Piece::Computer) {
                WIN_SCORE
            } else if board.has_winning_line(Piece::Player) {
                LOSS_SCORE
            } else if valid_columns.is_empty() {
                DRAW_SCORE
            } else {
                evaluate_board(board, Piece::Computer)
            };
            return SearchResult {
                column: None,
                score,
            };
        }

        let (piece, mut best) = if maximizing {
            (Piece::Computer, MAX_SENTINEL)
        } else {
            (Piece::Player, MIN_SENTINEL)
        };
        let mut best_column = self.fallback.pick(&valid_columns);

        for column in valid_columns {
            let mut next = *board;
            let dropped = next.drop_piece(column, piece);
            debug_assert!(dropped.is_ok(), "valid column {} rejected", column);
            let score = self
                .minimax(&next, depth - 1, ply + 1, alpha, beta, !maximizing)
                .score;
            if ply == 0 {
                trace!("column {}: {}", column, score);
            }

            if maximizing {
                if score > best {
                    best = score;
                    best_column = Some(column);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_column = Some(column);
                }
                beta = beta.min(best);
            }
            // the other side will never allow this branch
            if alpha >= beta {
                break;
            }
        }

        SearchResult {
            column: best_column,
            score: best,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// A search running on a worker thread
pub struct SearchHandle {
    receiver: Receiver<SearchResult>,
    worker: Option<JoinHandle<()>>,
}

impl SearchHandle {
    /// Returns the result if the search has finished, without blocking
    ///
    /// Fails if the worker stopped without sending a result.
    pub fn try_result(&self) -> Result<Option<SearchResult>, RecvError> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(RecvError),
        }
    }

    /// Blocks until the search finishes
    pub fn wait(mut self) -> Result<SearchResult, RecvError> {
        let result = self.receiver.recv();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        result
    }
}

/// Picks the column whose immediate placement scores best for `piece`
///
/// No lookahead is done, ties go to the lowest column.
pub fn best_move(board: &Board, piece: Piece) -> Option<usize> {
    let mut best_score = GREEDY_FLOOR;
    let mut best_column = board.valid_columns().first().copied();

    for column in board.valid_columns() {
        let mut next = *board;
        let dropped = next.drop_piece(column, piece);
        debug_assert!(dropped.is_ok(), "valid column {} rejected", column);
        let score = evaluate_board(&next, piece);
        trace!("greedy column {}: {}", column, score);
        if score > best_score {
            best_score = score;
            best_column = Some(column);
        }
    }
    best_column
}
