//! A single game between the player and the computer

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Piece};
use crate::error::{GameError, ParseDifficultyError};
use crate::search::Searcher;
use crate::terminal::GameState;

/// How far ahead the computer looks
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// The search depth in plies
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Hard => 5,
        }
    }

    /// The next difficulty in the menu
    pub fn toggle(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// The side to move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Turn {
    Player,
    Computer,
}

impl Turn {
    pub fn piece(&self) -> Piece {
        match self {
            Turn::Player => Piece::Player,
            Turn::Computer => Piece::Computer,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Turn::Player => Turn::Computer,
            Turn::Computer => Turn::Player,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Player => write!(f, "player"),
            Turn::Computer => write!(f, "computer"),
        }
    }
}

/// Who opens a new game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum FirstTurn {
    Player,
    Computer,
    #[default]
    Random,
}

/// The board, the side to move and the selected difficulty of one game
pub struct GameSession {
    board: Board,
    turn: Turn,
    state: GameState,
    difficulty: Difficulty,
    first_turn: FirstTurn,
    rng: StdRng,
}

impl GameSession {
    /// Starts a new game, `seed` drives the random choice of first mover
    pub fn new(difficulty: Difficulty, first_turn: FirstTurn, seed: u64) -> Self {
        let mut session = Self {
            board: Board::new(),
            turn: Turn::Player,
            state: GameState::Playing,
            difficulty,
            first_turn,
            rng: StdRng::seed_from_u64(seed),
        };
        session.reset();
        session
    }

    /// Clears the board and picks the first mover again
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.state = GameState::Playing;
        self.turn = match self.first_turn {
            FirstTurn::Player => Turn::Player,
            FirstTurn::Computer => Turn::Computer,
            FirstTurn::Random => {
                if self.rng.gen_bool(0.5) {
                    Turn::Player
                } else {
                    Turn::Computer
                }
            }
        };
        debug!("new {} game, {} moves first", self.difficulty, self.turn);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty used for the computer's next moves
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Plays the player's piece into `column`
    pub fn play_human(&mut self, column: usize) -> Result<GameState, GameError> {
        self.play(Turn::Player, column)
    }

    /// Lets the computer search for and play its move, returning the column
    pub fn play_computer(&mut self, searcher: &mut Searcher) -> Result<usize, GameError> {
        self.check_turn(Turn::Computer)?;
        let column = searcher.choose_column(&self.board, self.difficulty)?;
        self.play(Turn::Computer, column)?;
        Ok(column)
    }

    /// Plays a column already chosen for the computer, e.g. by a background search
    pub fn play_computer_column(&mut self, column: usize) -> Result<GameState, GameError> {
        self.play(Turn::Computer, column)
    }

    fn check_turn(&self, turn: Turn) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.turn != turn {
            return Err(GameError::NotYourTurn {
                expected: self.turn,
            });
        }
        Ok(())
    }

    fn play(&mut self, turn: Turn, column: usize) -> Result<GameState, GameError> {
        self.check_turn(turn)?;
        let row = self.board.drop_piece(column, turn.piece())?;
        debug!("{} played column {} (row {})", turn, column, row);

        self.state = self.board.state();
        if self.state.is_over() {
            info!("game over: {:?}", self.state);
        } else {
            self.turn = turn.other();
        }
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;

    #[test]
    fn difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 3);
        assert_eq!(Difficulty::Hard.depth(), 5);
        assert_eq!(Difficulty::Easy.toggle(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.toggle(), Difficulty::Easy);
    }

    #[test]
    fn difficulty_parsing() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(
            "medium".parse::<Difficulty>(),
            Err(ParseDifficultyError("medium".to_string()))
        );
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn turns_alternate() {
        let mut session = GameSession::new(Difficulty::Easy, FirstTurn::Player, 0);
        assert_eq!(session.turn(), Turn::Player);
        assert_eq!(session.play_human(3), Ok(GameState::Playing));
        assert_eq!(session.turn(), Turn::Computer);
        assert_eq!(
            session.play_human(3),
            Err(GameError::NotYourTurn {
                expected: Turn::Computer
            })
        );

        let mut searcher = Searcher::new();
        let column = session.play_computer(&mut searcher).unwrap();
        assert_eq!(session.board().num_pieces(), 2);
        assert!(column < crate::WIDTH);
        assert_eq!(session.turn(), Turn::Player);
    }

    #[test]
    fn rejected_move_keeps_turn() {
        let mut session = GameSession::new(Difficulty::Easy, FirstTurn::Player, 0);
        assert_eq!(
            session.play_human(9),
            Err(GameError::Board(BoardError::ColumnOutOfRange { column: 9 }))
        );
        assert_eq!(session.turn(), Turn::Player);
        assert_eq!(session.board().num_pieces(), 0);
    }

    #[test]
    fn win_ends_game() {
        let mut session = GameSession::new(Difficulty::Easy, FirstTurn::Player, 0);
        for column in [0, 1, 0, 1, 0, 1] {
            if session.turn() == Turn::Player {
                session.play_human(column).unwrap();
            } else {
                session.play_computer_column(column).unwrap();
            }
        }
        assert_eq!(session.play_human(0), Ok(GameState::PlayerWin));
        assert!(session.is_over());
        assert_eq!(session.play_computer_column(2), Err(GameError::GameOver));
        assert_eq!(
            session.play_computer(&mut Searcher::new()),
            Err(GameError::GameOver)
        );

        session.reset();
        assert!(!session.is_over());
        assert_eq!(session.board().num_pieces(), 0);
    }

    #[test]
    fn random_first_turn_is_seeded() {
        let first = |seed| GameSession::new(Difficulty::Hard, FirstTurn::Random, seed).turn();
        assert_eq!(first(7), first(7));
        let turns: Vec<Turn> = (0..32).map(first).collect();
        assert!(turns.contains(&Turn::Player));
        assert!(turns.contains(&Turn::Computer));
    }
}
