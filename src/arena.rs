//! Batches of computer-vs-computer games, used to compare search settings

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

use std::fmt;

use crate::board::{Board, Piece};
use crate::error::GameError;
use crate::search::{best_move, Searcher};
use crate::terminal::GameState;

/// A way of choosing moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// Alpha-beta search to a fixed depth
    Minimax { depth: u8 },
    /// The one-ply heuristic picker
    Greedy,
}

impl Strategy {
    /// Chooses a column for the side holding the computer's pieces
    pub fn choose(&self, board: &Board, searcher: &mut Searcher) -> Result<usize, GameError> {
        match self {
            Strategy::Minimax { depth } => searcher.pick_column(board, *depth),
            Strategy::Greedy => best_move(board, Piece::Computer).ok_or(GameError::NoValidColumns),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Minimax { depth } => write!(f, "minimax (depth {})", depth),
            Strategy::Greedy => write!(f, "greedy"),
        }
    }
}

/// Settings for a batch of games
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub first: Strategy,
    pub second: Strategy,
    pub games: usize,
    /// Random moves played before the strategies take over
    pub random_opening: usize,
    pub seed: u64,
    pub show_progress: bool,
}

/// Results of a batch, counted per strategy
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ArenaResult {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl ArenaResult {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Outcome {
    FirstWin,
    SecondWin,
    Draw,
}

/// Plays all games of the batch in parallel
pub fn run_matches(config: &ArenaConfig) -> Result<ArenaResult, GameError> {
    let progress = if config.show_progress {
        let progress = ProgressBar::new(config.games as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let outcomes = (0..config.games)
        .into_par_iter()
        .map(|game| {
            let outcome = play_game(config, game);
            progress.inc(1);
            outcome
        })
        .collect::<Result<Vec<_>, _>>()?;
    progress.finish();

    let mut result = ArenaResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::FirstWin => result.first_wins += 1,
            Outcome::SecondWin => result.second_wins += 1,
            Outcome::Draw => result.draws += 1,
        }
    }
    info!(
        "{} vs {}: {} wins, {} losses, {} draws",
        config.first, config.second, result.first_wins, result.second_wins, result.draws
    );
    Ok(result)
}

/// Plays a single game, the first strategy holds the computer's pieces
fn play_game(config: &ArenaConfig, game: usize) -> Result<Outcome, GameError> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(game as u64));
    let mut searcher = Searcher::new();
    let mut board = Board::new();

    // sides take turns opening
    let mut to_move = if game % 2 == 0 {
        Piece::Computer
    } else {
        Piece::Player
    };

    for _ in 0..config.random_opening {
        if board.is_terminal() {
            break;
        }
        let columns = board.valid_columns();
        if let Some(&column) = columns.choose(&mut rng) {
            board.drop_piece(column, to_move)?;
            to_move = to_move.opponent();
        }
    }

    while !board.is_terminal() {
        let column = if to_move == Piece::Computer {
            config.first.choose(&board, &mut searcher)?
        } else {
            // the second strategy sees the board from its own side
            config.second.choose(&board.swap_sides(), &mut searcher)?
        };
        board.drop_piece(column, to_move)?;
        to_move = to_move.opponent();
    }

    Ok(match board.state() {
        GameState::ComputerWin => Outcome::FirstWin,
        GameState::PlayerWin => Outcome::SecondWin,
        _ => Outcome::Draw,
    })
}
