//! Game lifecycle status and the rules verdict after each move.
//!
//! A game moves strictly forward through `waiting -> playing -> over`. The
//! end of a game is either decided on the board ([`judge_turn`], run after
//! every committed move) or imposed from outside by the clock or a
//! disconnect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chess_errors::GameError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameEndType {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    Time,
    Disconnect,
}

impl fmt::Display for GameEndType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameEndType::Checkmate => "checkmate",
            GameEndType::Stalemate => "stalemate",
            GameEndType::InsufficientMaterial => "insufficient material",
            GameEndType::Time => "time",
            GameEndType::Disconnect => "disconnect",
        };
        f.write_str(label)
    }
}

/// `{status, winner, endType}` as broadcast to the outer layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: GameStatus,
    pub winner: Option<Color>,
    pub end_type: Option<GameEndType>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::waiting()
    }
}

impl GameState {
    pub const fn waiting() -> Self {
        Self {
            status: GameStatus::Waiting,
            winner: None,
            end_type: None,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// `waiting -> playing`.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: GameStatus::Playing,
            });
        }
        self.status = GameStatus::Playing;
        Ok(())
    }

    /// `playing -> over`. A finished game keeps its first result.
    pub fn finish(&mut self, end_type: GameEndType, winner: Option<Color>) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: GameStatus::Over,
            });
        }
        self.status = GameStatus::Over;
        self.winner = winner;
        self.end_type = Some(end_type);
        Ok(())
    }
}

/// What the rules say about the position after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnVerdict {
    Continue,
    InsufficientMaterial,
    Checkmate { winner: Color },
    Stalemate,
}

impl TurnVerdict {
    /// The end type and winner this verdict finishes a game with, if any.
    pub fn outcome(self) -> Option<(GameEndType, Option<Color>)> {
        match self {
            TurnVerdict::Continue => None,
            TurnVerdict::InsufficientMaterial => Some((GameEndType::InsufficientMaterial, None)),
            TurnVerdict::Checkmate { winner } => Some((GameEndType::Checkmate, Some(winner))),
            TurnVerdict::Stalemate => Some((GameEndType::Stalemate, None)),
        }
    }
}

/// Evaluate the position for `side_to_move`, in priority order:
/// insufficient material, then legal moves, then checkmate or stalemate.
pub fn judge_turn(board: &mut Board, side_to_move: Color, ctx: &MoveContext<'_>) -> TurnVerdict {
    if has_insufficient_material(board) {
        return TurnVerdict::InsufficientMaterial;
    }

    let can_move = LegalMoveGenerator
        .has_any_legal_move(board, side_to_move, ctx)
        .unwrap_or_else(|err| panic!("board invariant violated: {err}"));
    if can_move {
        return TurnVerdict::Continue;
    }

    if is_in_check(board, side_to_move) {
        TurnVerdict::Checkmate {
            winner: side_to_move.opposite(),
        }
    } else {
        TurnVerdict::Stalemate
    }
}

/// Both sides are down to a bare king, king and bishop, or king and knight.
pub fn has_insufficient_material(board: &Board) -> bool {
    Color::BOTH
        .iter()
        .all(|&color| is_minimal_material(&board.all_pieces(Some(color))))
}

fn is_minimal_material(pieces: &[Piece]) -> bool {
    let non_kings: Vec<PieceKind> = pieces
        .iter()
        .map(|piece| piece.kind)
        .filter(|kind| *kind != PieceKind::King)
        .collect();

    match non_kings.as_slice() {
        [] => true,
        [PieceKind::Bishop] | [PieceKind::Knight] => true,
        _ => false,
    }
}
