//! Pawn movement: single and double pushes, diagonal captures, en passant.
//!
//! Any move landing on the far row is tagged as a promotion; the kind the
//! pawn becomes is chosen when the move is executed.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::is_enemy_on;
use crate::move_generation::move_generator::MoveContext;
use crate::moves::move_descriptions::{PotentialMove, SpecialMove};

pub fn generate_pawn_moves(
    board: &Board,
    piece: &Piece,
    ctx: &MoveContext<'_>,
    out: &mut Vec<PotentialMove>,
) {
    let color = piece.color;
    let direction = color.pawn_direction();
    let from = piece.square;

    if let Some(one_step) = from.offset(direction, 0) {
        if board.is_empty(one_step) {
            push_pawn_move(out, one_step, color);

            if from.row == color.pawn_start_row() {
                if let Some(two_step) = from.offset(2 * direction, 0) {
                    if board.is_empty(two_step) {
                        out.push(PotentialMove::quiet(two_step));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(direction, d_col) {
            if is_enemy_on(board, target, color) {
                push_pawn_move(out, target, color);
            }
        }
    }

    if let Some(target) = en_passant_target(piece, ctx) {
        out.push(PotentialMove::special(target, SpecialMove::EnPassant));
    }
}

/// Landing square for an en-passant capture, if the opponent's previous move
/// makes one available to this pawn.
fn en_passant_target(piece: &Piece, ctx: &MoveContext<'_>) -> Option<Square> {
    let color = piece.color;
    if piece.square.row != color.en_passant_row() {
        return None;
    }

    let last = ctx.en_passant_source(color)?;
    let eligible = last.piece.kind == PieceKind::Pawn
        && last.to.row == piece.square.row
        && last.to.col.abs_diff(piece.square.col) == 1
        && last.from.row.abs_diff(last.to.row) == 2;
    if !eligible {
        return None;
    }

    last.to.offset(color.pawn_direction(), 0)
}

#[inline]
fn push_pawn_move(out: &mut Vec<PotentialMove>, to: Square, color: Color) {
    if to.row == color.promotion_row() {
        out.push(PotentialMove::special(to, SpecialMove::Promotion));
    } else {
        out.push(PotentialMove::quiet(to));
    }
}
