//! Check oracle.
//!
//! Attacks are found by generating the attacker's moves under
//! [`MoveContext::attacks_only`], so castling and en passant never take part
//! in an attack and a probe never recurses into castling transit checks.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{generate_pseudo_moves, MoveContext};

/// True if any piece of `attacker_color` could move onto `square`.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let ctx = MoveContext::attacks_only();
    let mut targets = Vec::with_capacity(32);

    board.all_pieces(Some(attacker_color)).iter().any(|attacker| {
        targets.clear();
        generate_pseudo_moves(board, attacker, &ctx, &mut targets);
        targets.iter().any(|mv| mv.to == square)
    })
}

/// True if `color`'s king is attacked.
///
/// # Panics
///
/// Panics if `color` has no king on the board.
#[inline]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = board.expect_king(color);
    is_square_attacked(board, king, color.opposite())
}

/// Would `piece`'s own king be in check with `piece` moved to `destination`?
///
/// The board is borrowed mutably only for the probe and is restored before
/// this returns.
pub fn is_in_check_after_move(board: &mut Board, piece: &Piece, destination: Square) -> bool {
    board.with_simulated_move(piece.square, destination, |probe| is_in_check(probe, piece.color))
}

/// All pieces of `attacker_color` that attack `square`.
pub fn attackers_to_square(board: &Board, square: Square, attacker_color: Color) -> Vec<Piece> {
    let ctx = MoveContext::attacks_only();
    let mut targets = Vec::with_capacity(32);

    board
        .all_pieces(Some(attacker_color))
        .into_iter()
        .filter(|attacker| {
            targets.clear();
            generate_pseudo_moves(board, attacker, &ctx, &mut targets);
            targets.iter().any(|mv| mv.to == square)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{attackers_to_square, is_in_check, is_in_check_after_move, is_square_attacked};
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind, Square};

    fn sq(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    #[test]
    fn start_position_has_nobody_in_check() {
        let board = Board::from_placement(STARTING_POSITION_FEN).expect("start position should parse");
        assert!(!is_in_check(&board, Color::Light));
        assert!(!is_in_check(&board, Color::Dark));
        assert!(is_square_attacked(&board, sq(2, 0), Color::Light));
        assert!(!is_square_attacked(&board, sq(3, 0), Color::Light));
    }

    #[test]
    fn pawn_pushes_do_not_count_as_attacks_on_occupied_squares() {
        let board = Board::from_placement("4k3/8/8/8/8/4p3/4K3/8").expect("test placement should parse");
        assert!(!is_in_check(&board, Color::Light));

        let board = Board::from_placement("4k3/8/8/8/8/3p4/4K3/8").expect("test placement should parse");
        assert!(is_in_check(&board, Color::Light));
    }

    #[test]
    fn pinned_piece_moving_off_the_line_exposes_the_king() {
        let mut board = Board::from_placement("4r1k1/8/8/8/8/8/4B3/4K3").expect("test placement should parse");
        let bishop = *board.get(sq(1, 4)).expect("e2 holds the bishop");
        let before = board;

        assert!(is_in_check_after_move(&mut board, &bishop, sq(2, 3)));
        assert_eq!(board, before);
    }

    #[test]
    fn attackers_are_listed_per_square() {
        let board = Board::from_placement("4k3/8/8/8/8/2n5/8/R3K3").expect("test placement should parse");
        let attackers = attackers_to_square(&board, sq(0, 1), Color::Dark);
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].kind, PieceKind::Knight);
        assert!(attackers_to_square(&board, sq(0, 1), Color::Light)
            .iter()
            .any(|p| p.kind == PieceKind::Rook));
    }
}
