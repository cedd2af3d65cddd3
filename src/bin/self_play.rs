//! Random-vs-random self-play runner.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --config game.toml --seed 42 --max-plies 300 --board`

use std::time::Duration;

use duel_chess::config::GameConfig;
use duel_chess::game_state::clock::format_clock;
use duel_chess::game_state::chess_types::Color;
use duel_chess::utils::render_board::render_board;
use duel_chess::utils::self_play_harness::play_random_game;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match flag_value(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed: u64 = flag_value(&args, "--seed").map_or(Ok(1234), str::parse)?;
    let max_plies: usize = flag_value(&args, "--max-plies").map_or(Ok(400), str::parse)?;
    let show_board = args.iter().any(|a| a == "--board");

    let (report, game) = play_random_game(&config, seed, max_plies, Duration::from_millis(250))?;

    println!("{}", report.record);
    println!();
    if show_board {
        println!("{}", render_board(game.board()));
        println!();
    }
    println!(
        "plies: {}  advantage: {:+}  white {}  black {}",
        report.plies,
        report.advantage,
        format_clock(game.remaining_time(Color::Light)),
        format_clock(game.remaining_time(Color::Dark)),
    );
    match (report.state.end_type, report.state.winner) {
        (Some(end_type), Some(winner)) => println!("{winner} wins by {end_type}"),
        (Some(end_type), None) => println!("draw by {end_type}"),
        _ => println!("stopped after {max_plies} plies"),
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}
