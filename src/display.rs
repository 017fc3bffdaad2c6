use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, Print, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};

use connect4_minimax::{
    board::{Board, Piece},
    HEIGHT, WIDTH,
};

/// Draws the board in colour, top row first
pub fn draw_board(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(Print(cols + "\n"))?;

    for row in (0..HEIGHT).rev() {
        for &cell in board.row(row).unwrap_or_default() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Piece::Player => Color::Red,
                        Piece::Computer => Color::Yellow,
                        Piece::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(Print("\n"))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Prints `message` and reads one trimmed line of input
pub fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;

    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// Asks a yes/no question until a valid answer is given
pub fn confirm(message: &str) -> Result<bool> {
    loop {
        let answer = prompt(&format!("{} y/n: ", message))?;
        match answer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}
