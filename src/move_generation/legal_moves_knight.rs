use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::is_landable;
use crate::moves::directions::KNIGHT_JUMPS;
use crate::moves::move_descriptions::PotentialMove;

pub fn generate_knight_moves(board: &Board, piece: &Piece, out: &mut Vec<PotentialMove>) {
    for (d_row, d_col) in KNIGHT_JUMPS {
        let Some(to) = piece.square.offset(d_row, d_col) else {
            continue;
        };
        if is_landable(board, to, piece.color) {
            out.push(PotentialMove::quiet(to));
        }
    }
}
