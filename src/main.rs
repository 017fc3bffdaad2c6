use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use std::thread;
use std::time::Duration;

use connect4_minimax::{
    arena::{run_matches, ArenaConfig, Strategy},
    board::{Board, Piece},
    heuristic::evaluate_board,
    search::{best_move, Searcher},
    session::{Difficulty, FirstTurn, GameSession, Turn},
    terminal::GameState,
};

mod display;
use display::*;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Play Connect 4 against a minimax computer opponent")]
struct CommandArgs {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play against the computer (default)
    Play(PlayArg),
    /// Print the evaluation and best move of a position
    Analyze(AnalyzeArg),
    /// Play computer-vs-computer games and report the results
    Arena(ArenaArg),
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum FirstArg {
    Player,
    Computer,
    #[default]
    Random,
}

impl From<FirstArg> for FirstTurn {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Player => FirstTurn::Player,
            FirstArg::Computer => FirstTurn::Computer,
            FirstArg::Random => FirstTurn::Random,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
struct PlayArg {
    /// Skip the menu and start straight away at this difficulty (easy or hard)
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Who makes the first move
    #[arg(long, value_enum, default_value_t = FirstArg::Random)]
    first: FirstArg,
    /// Seed for choosing the first mover
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
struct AnalyzeArg {
    /// Moves played so far as 1-indexed column digits, e.g. 4453
    #[arg(long, default_value = "")]
    moves: String,
    /// Whether the computer made the first move
    #[arg(long)]
    computer_first: bool,
    /// Search depth in plies
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,
}

#[derive(Debug, Clone, Args)]
struct ArenaArg {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Search depth of the first strategy
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..))]
    first_depth: u8,
    /// Search depth of the second strategy
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..))]
    second_depth: u8,
    /// Use the one-ply greedy picker as the second strategy
    #[arg(long)]
    greedy_second: bool,
    /// Random moves played at the start of every game
    #[arg(long, default_value_t = 2)]
    opening_moves: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = CommandArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play(&arg),
        Mode::Analyze(arg) => analyze(&arg),
        Mode::Arena(arg) => arena(&arg),
    }
}

fn play(arg: &PlayArg) -> Result<()> {
    println!("Welcome to Connect 4\n");

    let seed = arg.seed.unwrap_or_else(rand::random);
    info!("first mover seed {}", seed);
    let mut session = GameSession::new(
        arg.difficulty.unwrap_or_default(),
        arg.first.into(),
        seed,
    );
    let mut searcher = Searcher::new();

    // menu loop
    loop {
        if arg.difficulty.is_none() && !menu(&mut session)? {
            return Ok(());
        }
        session.reset();

        // game loop
        loop {
            draw_board(session.board())?;

            match session.state() {
                GameState::Playing => match session.turn() {
                    Turn::Computer => {
                        let column = think(&mut searcher, &session)?;
                        println!("Computer plays: {}", column + 1);
                        session.play_computer_column(column)?;
                    }
                    Turn::Player => {
                        let input = prompt("Move input > ")?;
                        let column = match input.parse::<usize>() {
                            Ok(column @ 1..=connect4_minimax::WIDTH) => column - 1,
                            _ => {
                                println!("Invalid column: {}", input);
                                continue;
                            }
                        };
                        if let Err(err) = session.play_human(column) {
                            println!("{}", err);
                            // try the move again
                            continue;
                        }
                    }
                },

                // end states
                GameState::PlayerWin => {
                    println!("You won!");
                    break;
                }
                GameState::ComputerWin => {
                    println!("The computer wins!");
                    break;
                }
                GameState::Draw => {
                    println!("Draw!");
                    break;
                }
            }
        }

        if !confirm("Play again?")? {
            return Ok(());
        }
    }
}

/// Shows the difficulty menu, returns false if the player quits
fn menu(session: &mut GameSession) -> Result<bool> {
    loop {
        println!("Difficulty: {}", session.difficulty());
        let answer = prompt("[d] change difficulty, [s] start game, [q] quit > ")?;
        match answer.to_lowercase().chars().next() {
            Some('d') => session.set_difficulty(session.difficulty().toggle()),
            Some('s') => return Ok(true),
            Some('q') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Runs the computer's search in the background while showing a spinner
fn think(searcher: &mut Searcher, session: &GameSession) -> Result<usize> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
    spinner.set_message("Computer is thinking...");

    let handle = searcher.spawn(*session.board(), session.difficulty().depth(), true);
    let result = loop {
        if let Some(result) = handle.try_result()? {
            break result;
        }
        spinner.tick();
        thread::sleep(Duration::from_millis(100));
    };
    spinner.finish_and_clear();

    result
        .column
        .ok_or_else(|| anyhow!("the search found no playable column"))
}

fn analyze(arg: &AnalyzeArg) -> Result<()> {
    let first = if arg.computer_first {
        Piece::Computer
    } else {
        Piece::Player
    };
    let board = Board::from_moves(&arg.moves, first)?;
    draw_board(&board)?;

    println!("State: {:?}", board.state());
    println!(
        "Heuristic: computer {}, player {}",
        evaluate_board(&board, Piece::Computer),
        evaluate_board(&board, Piece::Player)
    );

    let mut searcher = Searcher::new();
    let result = searcher.search(&board, arg.depth, true);
    match result.column {
        Some(column) => println!(
            "Best move: {} (score {}, {} nodes searched)",
            column + 1,
            result.score,
            searcher.node_count
        ),
        None => println!("No move to search, score {}", result.score),
    }
    if let Some(column) = best_move(&board, Piece::Computer) {
        println!("Greedy move: {}", column + 1);
    }
    Ok(())
}

fn arena(arg: &ArenaArg) -> Result<()> {
    let config = ArenaConfig {
        first: Strategy::Minimax {
            depth: arg.first_depth,
        },
        second: if arg.greedy_second {
            Strategy::Greedy
        } else {
            Strategy::Minimax {
                depth: arg.second_depth,
            }
        },
        games: arg.games,
        random_opening: arg.opening_moves,
        seed: arg.seed,
        show_progress: true,
    };

    let result = run_matches(&config)?;
    println!("{} vs {}", config.first, config.second);
    println!(
        "{} wins, {} losses, {} draws out of {} games",
        result.first_wins,
        result.second_wins,
        result.draws,
        result.games()
    );
    Ok(())
}
