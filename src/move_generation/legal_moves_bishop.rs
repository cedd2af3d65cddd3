use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::walk_directions;
use crate::moves::directions::DIAGONALS;
use crate::moves::move_descriptions::PotentialMove;

pub fn generate_bishop_moves(board: &Board, piece: &Piece, out: &mut Vec<PotentialMove>) {
    walk_directions(board, piece, &DIAGONALS, true, out);
}
