//! King steps and castling.
//!
//! Castling is offered when the king has never moved, stands on its home
//! square, is the side to move and is not in check; the partner is an
//! unmoved rook in a corner of the same row; and every square strictly
//! between them is empty and would not leave the king in check if the king
//! stood there. The king then travels two squares toward the rook.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{BOARD_SIZE, KING_HOME_COL};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_in_check, is_in_check_after_move};
use crate::move_generation::legal_move_shared::walk_directions;
use crate::move_generation::move_generator::MoveContext;
use crate::moves::directions::KING_STEPS;
use crate::moves::move_descriptions::{PotentialMove, SpecialMove};

pub fn generate_king_moves(
    board: &Board,
    piece: &Piece,
    ctx: &MoveContext<'_>,
    out: &mut Vec<PotentialMove>,
) {
    walk_directions(board, piece, &KING_STEPS, false, out);

    if ctx.can_castle(piece.color) {
        generate_castling_moves(board, piece, out);
    }
}

fn generate_castling_moves(board: &Board, king: &Piece, out: &mut Vec<PotentialMove>) {
    let home = Square {
        row: king.color.back_row(),
        col: KING_HOME_COL,
    };
    if king.has_moved || king.square != home {
        return;
    }
    if is_in_check(board, king.color) {
        return;
    }

    for rook_col in [BOARD_SIZE - 1, 0] {
        let rook_square = Square {
            row: home.row,
            col: rook_col,
        };
        let rook_ready = board.get(rook_square).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
        });
        if !rook_ready || !transit_is_safe(board, king, rook_col) {
            continue;
        }

        let (special_move, d_col) = if rook_col < home.col {
            (SpecialMove::CastleLong, -2)
        } else {
            (SpecialMove::CastleShort, 2)
        };
        if let Some(to) = home.offset(0, d_col) {
            out.push(PotentialMove::special(to, special_move));
        }
    }
}

/// Every square strictly between king and rook must be empty and safe for
/// the king to stand on.
fn transit_is_safe(board: &Board, king: &Piece, rook_col: u8) -> bool {
    let (low, high) = if rook_col < king.square.col {
        (rook_col, king.square.col)
    } else {
        (king.square.col, rook_col)
    };

    let mut probe = *board;
    ((low + 1)..high).all(|col| {
        let square = Square {
            row: king.square.row,
            col,
        };
        board.is_empty(square) && !is_in_check_after_move(&mut probe, king, square)
    })
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Square};
    use crate::move_generation::move_generator::MoveContext;
    use crate::moves::move_descriptions::{PotentialMove, SpecialMove};

    fn king_moves(board: &Board, color: Color, ctx: &MoveContext<'_>) -> Vec<PotentialMove> {
        let square = board.expect_king(color);
        let king = *board.get(square).expect("king square should hold the king");
        let mut out = Vec::new();
        generate_king_moves(board, &king, ctx, &mut out);
        out
    }

    fn castles(moves: &[PotentialMove]) -> Vec<SpecialMove> {
        moves.iter().filter_map(|mv| mv.special_move).collect()
    }

    #[test]
    fn short_castle_offered_with_clear_safe_path() {
        let board = Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQK2R")
            .expect("test placement should parse");
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert!(moves.contains(&PotentialMove::special(
            Square { row: 0, col: 6 },
            SpecialMove::CastleShort
        )));
        assert_eq!(castles(&moves), vec![SpecialMove::CastleShort]);
    }

    #[test]
    fn castling_refused_when_not_the_side_to_move() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R").expect("test placement should parse");
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Dark, None));
        assert!(castles(&moves).is_empty());
        let moves = king_moves(&board, Color::Light, &MoveContext::attacks_only());
        assert!(castles(&moves).is_empty());
    }

    #[test]
    fn castling_refused_through_attacked_or_occupied_squares() {
        let board = Board::from_placement("4kr2/8/8/8/8/8/8/R3K2R").expect("test placement should parse");
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert_eq!(castles(&moves), vec![SpecialMove::CastleLong]);

        // b1 lies between king and rook, so an attack on it blocks the long castle.
        let board = Board::from_placement("1r2k3/8/8/8/8/8/8/R3K2R").expect("test placement should parse");
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert_eq!(castles(&moves), vec![SpecialMove::CastleShort]);

        let board = Board::from_placement("4k3/8/8/8/8/8/8/RN2K1NR").expect("test placement should parse");
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert!(castles(&moves).is_empty());
    }

    #[test]
    fn castling_refused_while_in_check_or_after_pieces_moved() {
        let board = Board::from_placement("4r1k1/8/8/8/8/8/8/R3K2R").expect("test placement should parse");
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert!(castles(&moves).is_empty());

        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R").expect("test placement should parse");
        board
            .get_mut(Square { row: 0, col: 7 })
            .expect("h1 holds a rook")
            .has_moved = true;
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert_eq!(castles(&moves), vec![SpecialMove::CastleLong]);

        board
            .get_mut(Square { row: 0, col: 4 })
            .expect("e1 holds the king")
            .has_moved = true;
        let moves = king_moves(&board, Color::Light, &MoveContext::for_turn(Color::Light, None));
        assert!(castles(&moves).is_empty());
    }
}
