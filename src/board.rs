//! The game board and its placement rules

use std::fmt;

use crate::error::BoardError;
use crate::{HEIGHT, WIDTH};

/// The contents of a single cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Piece {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Piece {
    pub fn is_empty(&self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// The piece of the other side, `Empty` has no opponent
    pub fn opponent(&self) -> Piece {
        match self {
            Piece::Player => Piece::Computer,
            Piece::Computer => Piece::Player,
            Piece::Empty => Piece::Empty,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Player => 'X',
            Piece::Computer => 'O',
        }
    }
}

/// A 7x6 Connect 4 board
///
/// Row 0 is the bottom of the board, so pieces in a column always form a
/// contiguous run starting at row 0 when placed through [`Board::drop_piece`]
/// or [`Board::first_open_row`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [Piece; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            cells: [Piece::Empty; WIDTH * HEIGHT],
        }
    }

    /// Builds a board from a string of 1-indexed column numbers, alternating
    /// pieces starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Piece) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut piece = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board.drop_piece(column - 1, piece)?;
                    piece = piece.opponent();
                }
                _ => return Err(BoardError::InvalidMove(column_char)),
            }
        }
        Ok(board)
    }

    /// The cell at `row` and `column`, `None` outside the board
    pub fn get(&self, row: usize, column: usize) -> Option<Piece> {
        if row >= HEIGHT || column >= WIDTH {
            return None;
        }
        Some(self.cell(row, column))
    }

    // unchecked, callers stay within the board
    pub(crate) fn cell(&self, row: usize, column: usize) -> Piece {
        self.cells[column + WIDTH * row]
    }

    /// Whether a piece can still be dropped into `column`
    pub fn is_valid_column(&self, column: usize) -> bool {
        column < WIDTH && self.cell(HEIGHT - 1, column).is_empty()
    }

    /// The lowest empty row of `column`
    pub fn first_open_row(&self, column: usize) -> Result<usize, BoardError> {
        if column >= WIDTH {
            return Err(BoardError::ColumnOutOfRange { column });
        }
        (0..HEIGHT)
            .find(|&row| self.cell(row, column).is_empty())
            .ok_or(BoardError::ColumnFull { column })
    }

    /// Sets a single cell
    ///
    /// Gravity is not enforced here, callers find the row with
    /// [`Board::first_open_row`] first.
    pub fn place(&mut self, row: usize, column: usize, piece: Piece) -> Result<(), BoardError> {
        if row >= HEIGHT || column >= WIDTH {
            return Err(BoardError::OutOfBounds { row, column });
        }
        let cell = &mut self.cells[column + WIDTH * row];
        if !cell.is_empty() {
            return Err(BoardError::CellOccupied { row, column });
        }
        *cell = piece;
        Ok(())
    }

    /// Drops `piece` into `column`, returning the row it lands on
    pub fn drop_piece(&mut self, column: usize, piece: Piece) -> Result<usize, BoardError> {
        let row = self.first_open_row(column)?;
        self.place(row, column, piece)?;
        Ok(row)
    }

    /// All playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.is_valid_column(column)).collect()
    }

    /// A copy of the board with the player's and computer's pieces exchanged
    pub fn swap_sides(&self) -> Self {
        let mut swapped = *self;
        for cell in swapped.cells.iter_mut() {
            *cell = cell.opponent();
        }
        swapped
    }

    pub fn num_pieces(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// The cells of a single row, left to right
    pub fn row(&self, row: usize) -> Option<&[Piece]> {
        if row >= HEIGHT {
            return None;
        }
        Some(&self.cells[WIDTH * row..WIDTH * (row + 1)])
    }

    /// The cells of a single column, bottom to top
    pub fn column(&self, column: usize) -> Option<[Piece; HEIGHT]> {
        if column >= WIDTH {
            return None;
        }
        let mut cells = [Piece::Empty; HEIGHT];
        for (row, cell) in cells.iter_mut().enumerate() {
            *cell = self.cell(row, column);
        }
        Some(cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        writeln!(f, "{}", header)?;
        for row in (0..HEIGHT).rev() {
            let line: String = (0..WIDTH)
                .map(|column| self.cell(row, column).symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
