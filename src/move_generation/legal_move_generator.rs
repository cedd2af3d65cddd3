//! Full legal move generation.
//!
//! Takes each piece's pseudo-legal candidates and drops the ones that would
//! leave the mover's own king in check.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_in_check, is_in_check_after_move};
use crate::move_generation::move_generator::{
    ensure_on_board, generate_pseudo_moves, MoveContext, MoveGenResult, MoveGenerator,
};
use crate::moves::move_descriptions::{PotentialMove, SpecialMove};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(
        &self,
        board: &mut Board,
        piece: &Piece,
        ctx: &MoveContext<'_>,
    ) -> MoveGenResult<Vec<PotentialMove>> {
        ensure_on_board(board, piece)?;

        let mut moves = Vec::with_capacity(28);
        generate_pseudo_moves(board, piece, ctx, &mut moves);
        moves.retain(|mv| !leaves_king_in_check(board, piece, mv));
        Ok(moves)
    }
}

impl LegalMoveGenerator {
    /// Legal moves for every piece of `color`, paired with the piece.
    pub fn generate_for_side(
        &self,
        board: &mut Board,
        color: Color,
        ctx: &MoveContext<'_>,
    ) -> MoveGenResult<Vec<(Piece, Vec<PotentialMove>)>> {
        let mut all = Vec::with_capacity(16);
        for piece in board.all_pieces(Some(color)) {
            let moves = self.generate_moves(board, &piece, ctx)?;
            if !moves.is_empty() {
                all.push((piece, moves));
            }
        }
        Ok(all)
    }

    /// Stops at the first legal move found.
    pub fn has_any_legal_move(
        &self,
        board: &mut Board,
        color: Color,
        ctx: &MoveContext<'_>,
    ) -> MoveGenResult<bool> {
        for piece in board.all_pieces(Some(color)) {
            if !self.generate_moves(board, &piece, ctx)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn leaves_king_in_check(board: &mut Board, piece: &Piece, mv: &PotentialMove) -> bool {
    if mv.special_move != Some(SpecialMove::EnPassant) {
        return is_in_check_after_move(board, piece, mv.to);
    }

    // The bypassed pawn leaves the board too, which can open a rank.
    let bypassed = Square {
        row: piece.square.row,
        col: mv.to.col,
    };
    board.with_simulated_move(piece.square, mv.to, |probe| {
        let mut probe = *probe;
        probe.clear(bypassed);
        is_in_check(&probe, piece.color)
    })
}

#[cfg(test)]
mod tests {
    use super::LegalMoveGenerator;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind, Square};
    use crate::move_generation::move_generator::{MoveContext, MoveGenerator};
    use crate::moves::move_descriptions::{CommittedMove, SpecialMove};

    fn sq(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    #[test]
    fn start_position_has_twenty_legal_moves() {
        let mut board = Board::from_placement(STARTING_POSITION_FEN).expect("start position should parse");
        let ctx = MoveContext::for_turn(Color::Light, None);
        let total: usize = LegalMoveGenerator
            .generate_for_side(&mut board, Color::Light, &ctx)
            .expect("generation should succeed")
            .iter()
            .map(|(_, moves)| moves.len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn pinned_rook_may_only_slide_along_the_pin() {
        let mut board = Board::from_placement("4r1k1/8/8/8/8/8/4R3/4K3").expect("test placement should parse");
        let rook = *board.get(sq(1, 4)).expect("e2 holds the rook");
        let moves = LegalMoveGenerator
            .generate_moves(&mut board, &rook, &MoveContext::for_turn(Color::Light, None))
            .expect("generation should succeed");
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|mv| mv.to.col == 4));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::from_placement("k7/8/8/8/8/8/1r6/4K3").expect("test placement should parse");
        let king = *board.get(sq(0, 4)).expect("e1 holds the king");
        let moves = LegalMoveGenerator
            .generate_moves(&mut board, &king, &MoveContext::for_turn(Color::Light, None))
            .expect("generation should succeed");
        assert!(moves.iter().all(|mv| mv.to.row == 0));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn en_passant_that_exposes_the_king_along_the_rank_is_illegal() {
        let mut board = Board::from_placement("7k/8/8/K2pP2r/8/8/8/8").expect("test placement should parse");
        let black_pawn = *board.get(sq(4, 3)).expect("d5 holds the black pawn");
        let record = CommittedMove {
            ply: 1,
            piece: crate::game_state::chess_types::Piece {
                square: sq(6, 3),
                has_moved: false,
                ..black_pawn
            },
            from: sq(6, 3),
            to: sq(4, 3),
            capture: None,
            special_move: None,
            promoted_to: None,
            check: false,
            checkmate: false,
            castled_rook: None,
        };
        let white_pawn = *board.get(sq(4, 4)).expect("e5 holds the white pawn");
        assert_eq!(white_pawn.kind, PieceKind::Pawn);

        let moves = LegalMoveGenerator
            .generate_moves(
                &mut board,
                &white_pawn,
                &MoveContext::for_turn(Color::Light, Some(&record)),
            )
            .expect("generation should succeed");
        assert!(moves
            .iter()
            .all(|mv| mv.special_move != Some(SpecialMove::EnPassant)));
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn side_with_no_moves_reports_none() {
        let mut board = Board::from_placement("7k/5Q2/6K1/8/8/8/8/8").expect("test placement should parse");
        let ctx = MoveContext::for_turn(Color::Dark, None);
        assert!(!LegalMoveGenerator
            .has_any_legal_move(&mut board, Color::Dark, &ctx)
            .expect("generation should succeed"));
    }
}
