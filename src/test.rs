#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use rand::{seq::SliceRandom, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::board::{Board, Piece};
    use crate::heuristic::{evaluate_board, evaluate_window};
    use crate::search::{Searcher, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
    use crate::terminal::GameState;
    use crate::{HEIGHT, LINE_LENGTH, WIDTH};

    /// Checks every line of four by walking each direction from every cell
    fn brute_force_line(board: &Board, piece: Piece) -> bool {
        let directions = [(0isize, 1isize), (1, 0), (1, 1), (-1, 1)];
        (0..HEIGHT as isize).any(|row| {
            (0..WIDTH as isize).any(|column| {
                directions.iter().any(|&(dy, dx)| {
                    (0..LINE_LENGTH as isize).all(|i| {
                        let (r, c) = (row + dy * i, column + dx * i);
                        r >= 0
                            && r < HEIGHT as isize
                            && c >= 0
                            && c < WIDTH as isize
                            && board.get(r as usize, c as usize) == Some(piece)
                    })
                })
            })
        })
    }

    /// Pieces in each column sit on top of each other from row 0
    fn no_floating_pieces(board: &Board) -> bool {
        (0..WIDTH).all(|column| {
            let cells = match board.column(column) {
                Some(cells) => cells,
                None => return false,
            };
            let height = cells.iter().take_while(|cell| !cell.is_empty()).count();
            cells[height..].iter().all(Piece::is_empty)
        })
    }

    /// Plays random games, handing every intermediate position to `check`
    fn random_positions<F>(seed: u64, games: usize, mut check: F) -> Result<()>
    where
        F: FnMut(&Board) -> Result<()>,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..games {
            let mut board = Board::new();
            let mut piece = Piece::Player;
            loop {
                check(&board)?;
                if board.is_terminal() {
                    break;
                }
                let columns = board.valid_columns();
                let column = *columns
                    .choose(&mut rng)
                    .ok_or(anyhow!("non-terminal board without moves"))?;
                board.drop_piece(column, piece)?;
                piece = piece.opponent();
            }
        }
        Ok(())
    }

    /// A full board without any line of four
    fn drawn_board() -> Result<Board> {
        let mut board = Board::new();
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let piece = if (column / 2 + row) % 2 == 0 {
                    Piece::Player
                } else {
                    Piece::Computer
                };
                board.place(row, column, piece)?;
            }
        }
        Ok(board)
    }

    #[test]
    pub fn bottom_row_line() -> Result<()> {
        let mut board = Board::new();
        for column in 0..4 {
            board.place(0, column, Piece::Computer)?;
        }
        assert!(board.has_winning_line(Piece::Computer));
        assert!(!board.has_winning_line(Piece::Player));
        Ok(())
    }

    #[test]
    pub fn line_detection_matches_brute_force() -> Result<()> {
        random_positions(1, 200, |board| {
            for &piece in &[Piece::Player, Piece::Computer] {
                assert_eq!(
                    board.has_winning_line(piece),
                    brute_force_line(board, piece),
                    "\n{}",
                    board
                );
            }
            Ok(())
        })
    }

    #[test]
    pub fn terminal_iff_line_or_full() -> Result<()> {
        random_positions(2, 200, |board| {
            let expected = board.has_winning_line(Piece::Player)
                || board.has_winning_line(Piece::Computer)
                || board.valid_columns().is_empty();
            assert_eq!(board.is_terminal(), expected);
            assert_eq!(board.state().is_over(), expected);
            Ok(())
        })
    }

    #[test]
    pub fn gravity_and_idempotent_queries() -> Result<()> {
        random_positions(3, 100, |board| {
            assert!(no_floating_pieces(board));
            assert_eq!(board.valid_columns(), board.valid_columns());
            for column in board.valid_columns() {
                let row = board.first_open_row(column)?;
                assert_eq!(board.get(row, column), Some(Piece::Empty));
                assert!(row == 0 || board.get(row - 1, column) != Some(Piece::Empty));
            }
            Ok(())
        })
    }

    #[test]
    pub fn search_leaves_board_untouched() -> Result<()> {
        let board = Board::from_moves("4435261", Piece::Player)?;
        let copy = board;
        Searcher::new().search(&board, 5, true);
        assert_eq!(board, copy);
        Ok(())
    }

    #[test]
    pub fn drawn_board_is_terminal() -> Result<()> {
        let board = drawn_board()?;
        assert!(board.valid_columns().is_empty());
        assert!(!board.has_winning_line(Piece::Player));
        assert!(!board.has_winning_line(Piece::Computer));
        assert!(board.is_terminal());
        assert_eq!(board.state(), GameState::Draw);

        let result = Searcher::new().search(&board, 3, true);
        assert_eq!(result.score, DRAW_SCORE);
        assert_eq!(result.column, None);
        Ok(())
    }

    #[test]
    pub fn terminal_scores_ignore_depth() -> Result<()> {
        let won = Board::from_moves("1212121", Piece::Computer)?;
        let lost = Board::from_moves("1212121", Piece::Player)?;
        let mut searcher = Searcher::new();
        for depth in 0..=5 {
            for &maximizing in &[true, false] {
                assert_eq!(searcher.search(&won, depth, maximizing).score, WIN_SCORE);
                assert_eq!(searcher.search(&lost, depth, maximizing).score, LOSS_SCORE);
            }
        }
        Ok(())
    }

    #[test]
    pub fn window_examples() {
        let window = [Piece::Computer, Piece::Computer, Piece::Computer, Piece::Empty];
        assert_eq!(evaluate_window(&window, Piece::Computer), 5);
        assert_eq!(evaluate_window(&window, Piece::Player), -4);
    }

    #[test]
    pub fn first_open_row_above_two() -> Result<()> {
        let board = Board::from_moves("11", Piece::Player)?;
        assert_eq!(board.first_open_row(0)?, 2);
        Ok(())
    }

    #[test]
    pub fn evaluation_is_from_each_side() -> Result<()> {
        // centre bonus is only awarded to the evaluating side
        let board = Board::from_moves("4", Piece::Computer)?;
        assert_eq!(evaluate_board(&board, Piece::Computer), 3);
        assert_eq!(evaluate_board(&board.swap_sides(), Piece::Player), 3);
        assert_eq!(evaluate_board(&board, Piece::Player), 0);
        Ok(())
    }

    #[test]
    pub fn computer_finds_forced_win() -> Result<()> {
        // every position where the computer can complete a line at once
        random_positions(4, 60, |board| {
            if board.is_terminal() {
                return Ok(());
            }
            let winning = board.valid_columns().into_iter().any(|column| {
                let mut next = *board;
                next.drop_piece(column, Piece::Computer).is_ok()
                    && next.has_winning_line(Piece::Computer)
            });
            if winning {
                let result = Searcher::new().search(board, 3, true);
                assert_eq!(result.score, WIN_SCORE, "\n{}", board);
                let column = result.column.ok_or(anyhow!("no column chosen"))?;
                let mut next = *board;
                next.drop_piece(column, Piece::Computer)?;
                // the chosen column keeps the win in reach
                assert_eq!(Searcher::new().search(&next, 2, false).score, WIN_SCORE);
            }
            Ok(())
        })
    }
}
