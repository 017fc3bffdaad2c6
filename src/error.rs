use crate::session::Turn;

/// Errors raised by board manipulation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} out of range, columns must be between 0 and {}", crate::WIDTH - 1)]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("cell ({row}, {column}) is outside the board")]
    OutOfBounds { row: usize, column: usize },

    #[error("cell ({row}, {column}) is already occupied")]
    CellOccupied { row: usize, column: usize },

    #[error("could not parse '{0}' as a valid move")]
    InvalidMove(char),
}

/// Errors raised while playing a game
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    Board(#[from] BoardError),

    #[error("it is the {expected}'s turn")]
    NotYourTurn { expected: Turn },

    #[error("the game is already over")]
    GameOver,

    #[error("no valid columns remain")]
    NoValidColumns,

    #[error("search depth must be at least one ply")]
    ZeroDepth,
}

/// Error returned when a difficulty name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}', expected 'easy' or 'hard'")]
pub struct ParseDifficultyError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_error_display() {
        assert_eq!(
            BoardError::ColumnOutOfRange { column: 9 }.to_string(),
            "column 9 out of range, columns must be between 0 and 6"
        );
        assert_eq!(
            BoardError::ColumnFull { column: 2 }.to_string(),
            "column 2 is full"
        );
    }

    #[test]
    fn game_error_wraps_board_error() {
        let err: GameError = BoardError::ColumnFull { column: 4 }.into();
        assert_eq!(err.to_string(), "invalid move: column 4 is full");
        assert_eq!(
            GameError::NotYourTurn {
                expected: Turn::Computer
            }
            .to_string(),
            "it is the computer's turn"
        );
        assert_eq!(
            GameError::ZeroDepth.to_string(),
            "search depth must be at least one ply"
        );
    }
}
