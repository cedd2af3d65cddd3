//! Terminal-oriented Unicode board renderer, rank 8 at the top.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in (0..BOARD_SIZE).rev() {
        out.push(char::from(b'1' + row));
        out.push(' ');

        for col in 0..BOARD_SIZE {
            match board.get(Square { row, col }) {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if col < BOARD_SIZE - 1 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + row));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
