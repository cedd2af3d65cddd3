//! Move execution.
//!
//! [`MoveExecutor`] carries out a move that generation already accepted:
//! relocates the castling rook, removes captured pieces from the board and
//! their owner's roster, moves the piece, swaps in the promoted piece and
//! reports whether the opponent is now in check. Turn order and the move log
//! belong to the caller.

use crate::chess_errors::MoveRejection;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;
use crate::game_state::player::Player;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::moves::move_descriptions::{CommittedMove, PotentialMove, SpecialMove};

pub struct MoveExecutor;

impl MoveExecutor {
    /// Execute `mv` for the piece on `from`.
    ///
    /// `promote_to` is only consulted for promotion moves. The returned
    /// record has `checkmate == false`; deciding mate is the game's job.
    pub fn execute(
        &self,
        board: &mut Board,
        players: &mut [Player; 2],
        from: Square,
        mv: &PotentialMove,
        promote_to: PieceKind,
        ply: u32,
    ) -> Result<CommittedMove, MoveRejection> {
        let moving = *board.get(from).ok_or(MoveRejection::EmptySquare(from))?;
        let is_promotion = mv.special_move == Some(SpecialMove::Promotion);
        if is_promotion && !promote_to.is_promotion_target() {
            return Err(MoveRejection::InvalidPromotion(promote_to));
        }
        let mover = moving.color;
        let opponent = mover.opposite();

        // Castling rook.
        let castled_rook = match mv.special_move {
            Some(special) if special.is_castle() => relocate_castling_rook(board, mover, special),
            _ => None,
        };

        // Captures.
        let capture_square = match mv.special_move {
            Some(SpecialMove::EnPassant) => mv.to.offset(-mover.pawn_direction(), 0),
            _ => Some(mv.to),
        };
        let capture = capture_square
            .filter(|&square| board.get(square).is_some_and(|p| p.color == opponent))
            .and_then(|square| board.clear(square));
        if let Some(captured) = capture {
            players[opponent.index()].retire(captured.id);
            players[mover.index()].record_capture(captured);
        }

        // Relocation.
        board.clear(from);
        board.place(
            Piece {
                has_moved: true,
                ..moving
            },
            mv.to,
        );

        // Promotion.
        let promoted_to = if is_promotion {
            board.clear(mv.to);
            players[mover.index()].retire(moving.id);
            let mut promoted = board.spawn(promote_to, mover, mv.to);
            promoted.has_moved = true;
            board.place(promoted, mv.to);
            players[mover.index()].enlist(promoted.id);
            Some(promote_to)
        } else {
            None
        };

        Ok(CommittedMove {
            ply,
            piece: moving,
            from,
            to: mv.to,
            capture,
            special_move: mv.special_move,
            promoted_to,
            check: is_in_check(board, opponent),
            checkmate: false,
            castled_rook,
        })
    }
}

/// Move the rook that castles alongside the king and return it as placed.
fn relocate_castling_rook(board: &mut Board, color: Color, special: SpecialMove) -> Option<Piece> {
    let row = color.back_row();
    let (rook_col, landing_col) = match special {
        SpecialMove::CastleShort => (BOARD_SIZE - 1, 5),
        _ => (0, 3),
    };

    let rook = board.clear(Square { row, col: rook_col })?;
    let landing = Square {
        row,
        col: landing_col,
    };
    let moved = Piece {
        has_moved: true,
        square: landing,
        ..rook
    };
    board.place(moved, landing);
    Some(moved)
}
