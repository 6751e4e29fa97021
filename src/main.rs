//! Terminal front end: human (Red) against the engine (Yellow).
//!
//! Usage: `connect4 [rows cols [depth]]`; defaults to a 6x7 board
//! searched to base depth 8.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use connect4::{AiEngine, Board, EngineConfig, GameStatus, Player};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let rows = parse_arg(&args, 0, 6);
    let cols = parse_arg(&args, 1, 7);
    let depth = parse_arg(&args, 2, 8) as u8;

    let mut board = Board::new(rows, cols);
    let mut engine = AiEngine::new(
        rows,
        cols,
        EngineConfig {
            max_depth: depth,
            time_budget: Some(Duration::from_secs(5)),
            ..EngineConfig::default()
        },
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("connect4: you are R, the engine is Y. Enter a column to move.");
    loop {
        println!("{board}");

        // Human move.
        let col = loop {
            print!("column (0-{}): ", cols - 1);
            stdout.flush()?;
            let Some(line) = lines.next() else {
                println!("\nbye");
                return Ok(());
            };
            let line = line?;
            match line.trim().parse::<usize>() {
                Ok(col) if col < cols && board.is_column_open(col) => break col,
                Ok(col) => println!("column {col} is full or out of range"),
                Err(_) => println!("enter a column number"),
            }
        };
        if let Err(err) = board.drop_piece(col, Player::Red) {
            println!("{err}");
            continue;
        }
        if announce_if_over(&board) {
            break;
        }

        // Engine move.
        match engine.choose_move(&board, Player::Yellow) {
            Ok(result) => {
                if let Err(err) = board.drop_piece(result.best_move, Player::Yellow) {
                    eprintln!("engine chose an illegal move: {err}");
                    break;
                }
                let tt = engine.tt_stats();
                println!(
                    "engine plays column {} (score {}, depth {}, {} nodes, {} ms, tt {}/{})",
                    result.best_move,
                    result.score,
                    result.depth,
                    result.nodes,
                    result.elapsed.as_millis(),
                    tt.used,
                    tt.capacity
                );
            }
            Err(err) => {
                eprintln!("engine error: {err}");
                break;
            }
        }
        if announce_if_over(&board) {
            break;
        }
    }

    Ok(())
}

fn parse_arg(args: &[String], idx: usize, default: usize) -> usize {
    args.get(idx)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(default)
}

/// Print the result if the game just ended.
fn announce_if_over(board: &Board) -> bool {
    match board.status() {
        GameStatus::InProgress => false,
        GameStatus::Win(Player::Red) => {
            println!("{board}\nyou win");
            true
        }
        GameStatus::Win(Player::Yellow) => {
            println!("{board}\nengine wins");
            true
        }
        GameStatus::Draw => {
            println!("{board}\ndraw");
            true
        }
    }
}
