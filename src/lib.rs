//! Crate root module declarations for the Duel Chess rules engine.
//!
//! Exposes the game model (board, players, clocks and the game state
//! machine), move generation, the session layer that persists and
//! broadcasts matches, and text utilities, so binaries, tests and host
//! services can import stable module paths.

pub mod chess_errors;
pub mod config;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod clock;
    pub mod game;
    pub mod game_state;
    pub mod player;
    pub mod position;
}

pub mod moves {
    pub mod directions;
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod engines {
    pub mod random_mover;
}

pub mod session {
    pub mod match_session;
    pub mod persistence;
}

pub mod utils {
    pub mod algebraic;
    pub mod annotation;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod move_list;
    pub mod render_board;
    pub mod self_play_harness;
}
