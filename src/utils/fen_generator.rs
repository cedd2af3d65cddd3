//! Board-to-FEN export.
//!
//! The placement field is exact. The remaining fields are reconstructed from
//! the same sources the rules use (move flags and the move log), so they are
//! informative rather than authoritative: re-importing a FEN only restores
//! the placement.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{BOARD_SIZE, KING_HOME_COL};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::SpecialMove;

/// Placement field only, rank 8 first.
pub fn generate_placement(board: &Board) -> String {
    let mut out = String::new();

    for row in (0..BOARD_SIZE).rev() {
        let mut empty_count = 0u8;

        for col in 0..BOARD_SIZE {
            match board.get(Square { row, col }) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row > 0 {
            out.push('/');
        }
    }

    out
}

/// Full six-field FEN for a position.
pub fn generate_fen(position: &Position) -> String {
    let side_to_move = match position.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {} 0 {}",
        generate_placement(position.board()),
        side_to_move,
        generate_castling_field(position.board()),
        generate_en_passant_field(position),
        position.ply() / 2 + 1
    )
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for color in Color::BOTH {
        let back_row = color.back_row();
        let king_ready = board
            .get(Square {
                row: back_row,
                col: KING_HOME_COL,
            })
            .is_some_and(|p| p.kind == PieceKind::King && p.color == color && !p.has_moved);
        if !king_ready {
            continue;
        }

        for (col, letter) in [(BOARD_SIZE - 1, 'k'), (0, 'q')] {
            let rook_ready = board
                .get(Square { row: back_row, col })
                .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
            if rook_ready {
                out.push(match color {
                    Color::Light => letter.to_ascii_uppercase(),
                    Color::Dark => letter,
                });
            }
        }
    }

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(position: &Position) -> String {
    let Some(last) = position.last_move() else {
        return "-".to_owned();
    };

    let double_step = last.piece.kind == PieceKind::Pawn
        && last.from.row.abs_diff(last.to.row) == 2
        && last.special_move != Some(SpecialMove::Promotion);
    if !double_step {
        return "-".to_owned();
    }

    let passed = Square {
        row: (last.from.row + last.to.row) / 2,
        col: last.to.col,
    };
    passed.to_string()
}
