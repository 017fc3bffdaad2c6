//! A computer opponent for the board game 'Connect 4'
//!
//! The computer picks its moves with a fixed-depth minimax search using
//! alpha-beta pruning, falling back to a heuristic evaluation of the board
//! once the search depth runs out.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::{Board, Piece}, search::Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("454545", Piece::Computer)?;
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&board, 3, true);
//!
//! // the computer completes its vertical line
//! assert_eq!(result.column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod terminal;

pub mod heuristic;

pub mod search;

pub mod session;

pub mod arena;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned pieces needed to win
pub const LINE_LENGTH: usize = 4;

// a line must fit on the board in every direction
const_assert!(LINE_LENGTH <= WIDTH);
const_assert!(LINE_LENGTH <= HEIGHT);
