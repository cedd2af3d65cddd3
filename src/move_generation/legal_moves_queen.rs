use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::walk_directions;
use crate::moves::directions::ALL_DIRECTIONS;
use crate::moves::move_descriptions::PotentialMove;

/// Union of rook and bishop rays.
pub fn generate_queen_moves(board: &Board, piece: &Piece, out: &mut Vec<PotentialMove>) {
    walk_directions(board, piece, &ALL_DIRECTIONS, true, out);
}
