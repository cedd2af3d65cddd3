//! Errors used throughout the rules engine.
//!
//! Each subsystem gets its own enum so callers can match on exactly the
//! failures they can cause:
//! - [`FenError`] for position import, fatal for game construction.
//! - [`MoveRejection`] for refused move intents; these never mutate state.
//! - [`GameError`] for invalid lifecycle transitions and replay failures.
//! - [`PersistenceError`] and [`ConfigError`] for the I/O edges.
//!
//! Corrupted board state is not represented here as a recoverable error: it
//! is reported as an [`InvariantViolation`] by `Board::validate` and turned
//! into a panic wherever the engine depends on the invariant.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameStatus;

/// Failure to build a board from a placement string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("placement is empty")]
    Empty,

    #[error("placement must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("invalid character '{ch}' in rank {rank}")]
    InvalidChar { rank: usize, ch: char },

    #[error("invalid empty-square count '{0}'")]
    InvalidEmptyCount(char),

    #[error("rank {rank} describes {files} files instead of 8")]
    FileCount { rank: usize, files: usize },

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("pawn placed on back rank at {0}")]
    PawnOnBackRank(Square),
}

/// Reasons a move intent is refused. The game is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("game is not being played (status {0:?})")]
    GameNotPlaying(GameStatus),

    #[error("movements are currently frozen")]
    Frozen,

    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i8, col: i8 },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("it is {expected}'s turn, not {found}'s")]
    NotYourTurn { expected: Color, found: Color },

    #[error("source and destination are both {0}")]
    SameSquare(Square),

    #[error("{kind} on {from} cannot move to {to}")]
    IllegalMove {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),
}

/// Lifecycle and setup failures of a [`crate::game_state::game::Game`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: GameStatus, to: GameStatus },

    #[error("{0} is in check while it is not their turn")]
    OpponentInCheck(Color),

    #[error("stored move {index} could not be replayed: {reason}")]
    Replay {
        index: usize,
        reason: MoveRejection,
    },

    #[error("ply {requested} is beyond the {available} plies played")]
    PlyOutOfRange { requested: usize, available: usize },
}

/// Failures of a persistence sink. Always logged, never fatal to play.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    #[error("room file for '{requested}' holds room '{found}'")]
    RoomMismatch { requested: String, found: String },

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("room document could not be (de)serialized: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while rebuilding a match session from storage.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Failures while loading a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Board corruption. Indicates a bug in the engine rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("piece {id} on grid square {grid} believes it is on {recorded}")]
    SquareMismatch {
        id: u16,
        grid: Square,
        recorded: Square,
    },

    #[error("piece id {0} appears on more than one square")]
    DuplicatePiece(u16),

    #[error("{color} has {count} kings on the board")]
    KingCount { color: Color, count: usize },

    #[error("{color}'s roster disagrees with the board")]
    RosterMismatch { color: Color },
}
