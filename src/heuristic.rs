//! Static evaluation of non-terminal positions

use crate::board::{Board, Piece};
use crate::{HEIGHT, LINE_LENGTH, WIDTH};

/// Four aligned cells scored together
pub type Window = [Piece; LINE_LENGTH];

/// Score for a window completely owned by the evaluating side
pub const FOUR_SCORE: i32 = 100;
/// Score for three of the evaluating side's pieces and one gap
pub const THREE_SCORE: i32 = 5;
/// Score for two of the evaluating side's pieces and two gaps
pub const TWO_SCORE: i32 = 2;
/// Penalty for three opponent pieces and one gap
pub const OPPONENT_THREE_PENALTY: i32 = -4;
/// Bonus for each of the evaluating side's pieces in the centre column
pub const CENTRE_BONUS: i32 = 3;

/// Scores a single window from the point of view of `piece`
pub fn evaluate_window(window: &Window, piece: Piece) -> i32 {
    let count = |p: Piece| window.iter().filter(|&&cell| cell == p).count();
    let own = count(piece);
    let opponent = count(piece.opponent());
    let empty = count(Piece::Empty);

    let mut score = match (own, empty) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };
    // only an opponent three is penalised, an opponent two is not
    if opponent == 3 && empty == 1 {
        score += OPPONENT_THREE_PENALTY;
    }
    score
}

/// Every horizontal, vertical and diagonal window on the board
pub fn windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    let window = move |row: usize, column: usize, dy: isize, dx: isize| {
        let mut cells = [Piece::Empty; LINE_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            let r = (row as isize + dy * i as isize) as usize;
            let c = (column as isize + dx * i as isize) as usize;
            *cell = board.cell(r, c);
        }
        cells
    };

    let vertical = (0..WIDTH).flat_map(move |column| {
        (0..=HEIGHT - LINE_LENGTH).map(move |row| window(row, column, 1, 0))
    });
    let horizontal = (0..HEIGHT).flat_map(move |row| {
        (0..=WIDTH - LINE_LENGTH).map(move |column| window(row, column, 0, 1))
    });
    let rising = (0..=HEIGHT - LINE_LENGTH).flat_map(move |row| {
        (0..=WIDTH - LINE_LENGTH).map(move |column| window(row, column, 1, 1))
    });
    let falling = (0..=HEIGHT - LINE_LENGTH).flat_map(move |row| {
        (0..=WIDTH - LINE_LENGTH)
            .map(move |column| window(row + LINE_LENGTH - 1, column, -1, 1))
    });

    vertical.chain(horizontal).chain(rising).chain(falling)
}

/// Scores a whole board from the point of view of `piece`
///
/// Only the evaluating side earns the centre column bonus, there is no
/// matching penalty for the opponent's centre pieces.
pub fn evaluate_board(board: &Board, piece: Piece) -> i32 {
    let centre = (0..HEIGHT)
        .filter(|&row| board.cell(row, WIDTH / 2) == piece)
        .count() as i32
        * CENTRE_BONUS;

    centre
        + windows(board)
            .map(|window| evaluate_window(&window, piece))
            .sum::<i32>()
}
