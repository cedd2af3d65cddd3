//! Helpers shared by the per-kind generators.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::PotentialMove;

/// True when `square` holds a piece of the other side.
#[inline]
pub fn is_enemy_on(board: &Board, square: Square, color: Color) -> bool {
    board.get(square).is_some_and(|occupant| occupant.color != color)
}

/// Empty or enemy-occupied: a square a non-pawn piece may land on.
#[inline]
pub fn is_landable(board: &Board, square: Square, color: Color) -> bool {
    board.get(square).map_or(true, |occupant| occupant.color != color)
}

/// Walk each direction from the piece's square, pushing every empty square
/// and stopping at the first occupant (included when it is an enemy). With
/// `repeating == false` each direction contributes at most one step.
pub fn walk_directions(
    board: &Board,
    piece: &Piece,
    directions: &[(i8, i8)],
    repeating: bool,
    out: &mut Vec<PotentialMove>,
) {
    for &(d_row, d_col) in directions {
        let mut current = piece.square;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.get(next) {
                Some(occupant) => {
                    if occupant.color != piece.color {
                        out.push(PotentialMove::quiet(next));
                    }
                    break;
                }
                None => out.push(PotentialMove::quiet(next)),
            }
            if !repeating {
                break;
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::walk_directions;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, PieceKind, Square};
    use crate::moves::directions::ORTHOGONALS;

    #[test]
    fn rays_stop_at_own_pieces_and_include_enemy_blockers() {
        let mut board = Board::empty();
        let rook = board.spawn(PieceKind::Rook, Color::Light, Square { row: 0, col: 0 });
        board.spawn(PieceKind::Pawn, Color::Light, Square { row: 2, col: 0 });
        board.spawn(PieceKind::Knight, Color::Dark, Square { row: 0, col: 3 });

        let mut out = Vec::new();
        walk_directions(&board, &rook, &ORTHOGONALS, true, &mut out);
        let mut targets: Vec<Square> = out.iter().map(|mv| mv.to).collect();
        targets.sort_by_key(|sq| (sq.row, sq.col));

        assert_eq!(
            targets,
            vec![
                Square { row: 0, col: 1 },
                Square { row: 0, col: 2 },
                Square { row: 0, col: 3 },
                Square { row: 1, col: 0 },
            ]
        );
    }
}
