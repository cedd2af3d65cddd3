//! Move generator trait and the context generation runs under.
//!
//! Generation is split in two layers: [`PseudoLegalMoveGenerator`] follows
//! each piece's movement pattern and ignores king safety, while
//! [`LegalMoveGenerator`](crate::move_generation::legal_move_generator::LegalMoveGenerator)
//! filters those candidates through the check oracle.

use thiserror::Error;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::{CommittedMove, PotentialMove};

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("piece {id} is not on {square}")]
    StalePiece { id: PieceId, square: Square },
}

/// Turn-dependent inputs to generation.
///
/// Castling and en passant are only ever offered to the side to move, and en
/// passant only against the opponent's immediately preceding move. The
/// attack-only context used by the check oracle offers neither, which keeps
/// king-safety probes from recursing into castling transit checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveContext<'a> {
    turn: Option<Color>,
    last_move: Option<&'a CommittedMove>,
}

impl<'a> MoveContext<'a> {
    pub fn for_turn(side_to_move: Color, last_move: Option<&'a CommittedMove>) -> Self {
        Self {
            turn: Some(side_to_move),
            last_move,
        }
    }

    /// Plain movement patterns only: no castling, no en passant.
    pub const fn attacks_only() -> Self {
        Self {
            turn: None,
            last_move: None,
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Option<Color> {
        self.turn
    }

    #[inline]
    pub fn can_castle(&self, color: Color) -> bool {
        self.turn == Some(color)
    }

    /// The opponent move `color` may capture en passant against, if any.
    pub fn en_passant_source(&self, color: Color) -> Option<&'a CommittedMove> {
        if self.turn != Some(color) {
            return None;
        }
        self.last_move.filter(|last| last.piece.color != color)
    }
}

pub trait MoveGenerator: Send + Sync {
    /// Candidate moves for `piece`, which must currently stand on the board.
    fn generate_moves(
        &self,
        board: &mut Board,
        piece: &Piece,
        ctx: &MoveContext<'_>,
    ) -> MoveGenResult<Vec<PotentialMove>>;
}

/// Movement patterns per piece kind, without king-safety filtering.
pub struct PseudoLegalMoveGenerator;

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(
        &self,
        board: &mut Board,
        piece: &Piece,
        ctx: &MoveContext<'_>,
    ) -> MoveGenResult<Vec<PotentialMove>> {
        ensure_on_board(board, piece)?;
        let mut out = Vec::with_capacity(28);
        generate_pseudo_moves(board, piece, ctx, &mut out);
        Ok(out)
    }
}

/// Dispatch to the per-kind generator, appending to `out`.
pub fn generate_pseudo_moves(
    board: &Board,
    piece: &Piece,
    ctx: &MoveContext<'_>,
    out: &mut Vec<PotentialMove>,
) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, piece, ctx, out),
        PieceKind::Knight => generate_knight_moves(board, piece, out),
        PieceKind::Bishop => generate_bishop_moves(board, piece, out),
        PieceKind::Rook => generate_rook_moves(board, piece, out),
        PieceKind::Queen => generate_queen_moves(board, piece, out),
        PieceKind::King => generate_king_moves(board, piece, ctx, out),
    }
}

pub(crate) fn ensure_on_board(board: &Board, piece: &Piece) -> MoveGenResult<()> {
    match board.get(piece.square) {
        Some(found) if found.id == piece.id => Ok(()),
        _ => Err(MoveGenerationError::StalePiece {
            id: piece.id,
            square: piece.square,
        }),
    }
}
