//! Move records exchanged between the generator, the executor and callers.
//!
//! - [`PotentialMove`]: a candidate destination produced by generation.
//! - [`CommittedMove`]: the immutable record of an executed move.
//! - [`MoveIntent`]: a request from the UI or the network to move a piece.

use serde::{Deserialize, Serialize};

use crate::chess_errors::MoveRejection;
use crate::game_state::chess_types::{Piece, PieceKind, Square};

/// Tag for moves whose execution has compound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialMove {
    CastleShort,
    CastleLong,
    EnPassant,
    Promotion,
}

impl SpecialMove {
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, SpecialMove::CastleShort | SpecialMove::CastleLong)
    }
}

/// Candidate destination for a piece. Pure data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PotentialMove {
    pub to: Square,
    pub special_move: Option<SpecialMove>,
}

impl PotentialMove {
    #[inline]
    pub const fn quiet(to: Square) -> Self {
        Self {
            to,
            special_move: None,
        }
    }

    #[inline]
    pub const fn special(to: Square, special_move: SpecialMove) -> Self {
        Self {
            to,
            special_move: Some(special_move),
        }
    }
}

/// Record of an executed move, appended to the mover's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedMove {
    /// Zero-based half-move index within the game.
    pub ply: u32,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub capture: Option<Piece>,
    pub special_move: Option<SpecialMove>,
    /// Kind the pawn turned into, for promotions.
    pub promoted_to: Option<PieceKind>,
    pub check: bool,
    pub checkmate: bool,
    /// The rook that moved alongside the king, at its new square.
    pub castled_rook: Option<Piece>,
}

impl CommittedMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// True for a pawn advancing two rows in one move.
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.row.abs_diff(self.to.row) == 2
    }

    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            from: self.from,
            to: self.to,
            promote_to: self.promoted_to,
        }
    }
}

/// A request to move whatever stands on `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    pub from: Square,
    pub to: Square,
    /// Promotion choice; `None` promotes to a queen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promote_to: Option<PieceKind>,
}

impl MoveIntent {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promote_to: None,
        }
    }

    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promote_to = Some(kind);
        self
    }

    /// Build an intent from raw coordinates, rejecting anything off the board.
    pub fn from_coords(
        from_row: i8,
        from_col: i8,
        to_row: i8,
        to_col: i8,
    ) -> Result<Self, MoveRejection> {
        let from = Square::new(from_row, from_col).ok_or(MoveRejection::OutOfBounds {
            row: from_row,
            col: from_col,
        })?;
        let to = Square::new(to_row, to_col).ok_or(MoveRejection::OutOfBounds {
            row: to_row,
            col: to_col,
        })?;
        Ok(Self::new(from, to))
    }
}
