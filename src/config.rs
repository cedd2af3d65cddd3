//! Game setup loaded from TOML.
//!
//! ```toml
//! fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
//! first_to_move = "white"
//! initial_time_secs = 600
//! increment_secs = 5
//! ```
//!
//! Every field is optional and falls back to a standard game with twenty
//! minutes per side and no increment.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ConfigError;
use crate::game_state::chess_rules::{
    DEFAULT_INCREMENT_SECS, DEFAULT_INITIAL_TIME_SECS, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::MoveIntent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting placement. A full FEN is accepted; only the placement is read.
    pub fen: String,
    pub first_to_move: Color,
    pub initial_time_secs: u64,
    pub increment_secs: u64,
    /// Remaining time overrides for a game resumed with clocks partly spent.
    pub white_time_secs: Option<u64>,
    pub black_time_secs: Option<u64>,
    /// Moves replayed onto the starting placement when the game starts.
    pub moves: Vec<MoveIntent>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fen: STARTING_POSITION_FEN.to_owned(),
            first_to_move: Color::Light,
            initial_time_secs: DEFAULT_INITIAL_TIME_SECS,
            increment_secs: DEFAULT_INCREMENT_SECS,
            white_time_secs: None,
            black_time_secs: None,
            moves: Vec::new(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Starting time on `color`'s clock.
    pub fn time_for(&self, color: Color) -> Duration {
        let override_secs = match color {
            Color::Light => self.white_time_secs,
            Color::Dark => self.black_time_secs,
        };
        Duration::from_secs(override_secs.unwrap_or(self.initial_time_secs))
    }

    pub fn increment(&self) -> Duration {
        Duration::from_secs(self.increment_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::GameConfig;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, Square};
    use std::time::Duration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty TOML should parse");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.fen, STARTING_POSITION_FEN);
        assert_eq!(config.time_for(Color::Dark), Duration::from_secs(1200));
    }

    #[test]
    fn overrides_and_moves_are_read() {
        let config = GameConfig::from_toml_str(
            r#"
            fen = "7k/8/5QK1/8/8/8/8/8"
            first_to_move = "black"
            initial_time_secs = 300
            increment_secs = 2
            white_time_secs = 41

            [[moves]]
            from = { row = 7, col = 7 }
            to = { row = 7, col = 6 }
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.first_to_move, Color::Dark);
        assert_eq!(config.time_for(Color::Light), Duration::from_secs(41));
        assert_eq!(config.time_for(Color::Dark), Duration::from_secs(300));
        assert_eq!(config.increment(), Duration::from_secs(2));
        assert_eq!(config.moves.len(), 1);
        assert_eq!(config.moves[0].to, Square { row: 7, col: 6 });
        assert_eq!(config.moves[0].promote_to, None);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(GameConfig::from_toml_str("first_to_move = \"green\"").is_err());
        assert!(GameConfig::load("/nonexistent/duel_chess.toml").is_err());
    }
}
