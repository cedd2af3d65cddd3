//! Numbered move lists and PGN-style game records.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game::Game;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::moves::move_descriptions::CommittedMove;
use crate::utils::annotation::annotate;
use crate::utils::fen_generator::generate_placement;

/// `1. e4 e5 2. Nf3`, starting with `1...` when black moved first.
pub fn format_move_list(moves: &[&CommittedMove], first_to_move: Color) -> String {
    let mut parts = Vec::<String>::with_capacity(moves.len() + moves.len() / 2 + 1);
    let offset = match first_to_move {
        Color::Light => 0,
        Color::Dark => 1,
    };

    for (index, record) in moves.iter().enumerate() {
        let half_move = index + offset;
        let number = half_move / 2 + 1;
        if half_move % 2 == 0 {
            parts.push(format!("{number}."));
        } else if index == 0 {
            parts.push(format!("{number}..."));
        }
        parts.push(annotate(record));
    }

    parts.join(" ")
}

/// PGN result token for a game state.
pub fn result_token(state: &GameState) -> &'static str {
    if state.status != GameStatus::Over {
        return "*";
    }
    match state.winner {
        Some(Color::Light) => "1-0",
        Some(Color::Dark) => "0-1",
        None => "1/2-1/2",
    }
}

/// Header block plus move text for a whole game.
pub fn write_game_record(game: &Game) -> String {
    let state = game.state();
    let first_to_move = game.first_to_move();
    let mut headers = BTreeMap::<&str, String>::new();
    headers.insert("Event", "Duel Chess Game".to_owned());
    headers.insert("Date", Utc::now().format("%Y.%m.%d").to_string());
    headers.insert("Result", result_token(&state).to_owned());
    if let Some(end_type) = state.end_type {
        headers.insert("Termination", end_type.to_string());
    }

    let initial = game
        .position_at(0)
        .map(|position| generate_placement(position.board()))
        .unwrap_or_default();
    if !STARTING_POSITION_FEN.starts_with(&format!("{initial} ")) || first_to_move != Color::Light {
        headers.insert("SetUp", "1".to_owned());
        headers.insert("FEN", initial);
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{key} \"{}\"]\n", value.replace('"', "\\\"")));
    }
    out.push('\n');

    let moves = format_move_list(&game.merged_moves(), first_to_move);
    if !moves.is_empty() {
        out.push_str(&moves);
        out.push(' ');
    }
    out.push_str(result_token(&state));
    out
}
