//! Canonical chess-rule constants.
//!
//! Static literals used to set up a game: board dimensions, the standard
//! starting placement, and the default time control.

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
/// Only the placement field is consumed when setting up a board.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Column the king starts on (the e-file).
pub const KING_HOME_COL: u8 = 4;

/// Default clock per side, in seconds.
pub const DEFAULT_INITIAL_TIME_SECS: u64 = 1200;

/// Default per-move increment, in seconds.
pub const DEFAULT_INCREMENT_SECS: u64 = 0;
