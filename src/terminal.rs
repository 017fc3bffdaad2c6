//! Win and draw detection

use crate::board::{Board, Piece};
use crate::{HEIGHT, LINE_LENGTH, WIDTH};

/// The state of a game as read off the board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerWin,
    ComputerWin,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

impl Board {
    /// Whether `piece` has four in a row anywhere on the board
    pub fn has_winning_line(&self, piece: Piece) -> bool {
        let line = |row: usize, column: usize, dy: isize, dx: isize| {
            (0..LINE_LENGTH as isize).all(|i| {
                let r = (row as isize + dy * i) as usize;
                let c = (column as isize + dx * i) as usize;
                self.cell(r, c) == piece
            })
        };

        // horizontal
        for column in 0..=WIDTH - LINE_LENGTH {
            for row in 0..HEIGHT {
                if line(row, column, 0, 1) {
                    return true;
                }
            }
        }

        // vertical
        for column in 0..WIDTH {
            for row in 0..=HEIGHT - LINE_LENGTH {
                if line(row, column, 1, 0) {
                    return true;
                }
            }
        }

        // diagonal /
        for column in 0..=WIDTH - LINE_LENGTH {
            for row in 0..=HEIGHT - LINE_LENGTH {
                if line(row, column, 1, 1) {
                    return true;
                }
            }
        }

        // diagonal \, starting from the top-left end
        for column in 0..=WIDTH - LINE_LENGTH {
            for row in LINE_LENGTH - 1..HEIGHT {
                if line(row, column, -1, 1) {
                    return true;
                }
            }
        }

        false
    }

    /// Whether every column is full
    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.is_valid_column(column))
    }

    /// Whether the game cannot continue from this position
    pub fn is_terminal(&self) -> bool {
        self.has_winning_line(Piece::Player)
            || self.has_winning_line(Piece::Computer)
            || self.is_full()
    }

    pub fn state(&self) -> GameState {
        if self.has_winning_line(Piece::Computer) {
            GameState::ComputerWin
        } else if self.has_winning_line(Piece::Player) {
            GameState::PlayerWin
        } else if self.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}
