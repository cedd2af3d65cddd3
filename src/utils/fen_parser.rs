//! FEN placement-to-Board parser.
//!
//! Only the placement field is consumed: ranks separated by `/`, rank 8
//! first, digits for runs of empty squares and piece letters with case
//! giving the side. Active color, castling rights, en-passant target and the
//! move counters are ignored; castling and en-passant eligibility are derived
//! from `has_moved` flags and the move log instead.

use crate::chess_errors::FenError;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;

/// Parse a placement string (or a full FEN) into a fresh board.
///
/// The whole string is validated before anything is returned, so a
/// malformed placement never yields a partially populated board.
pub fn parse_placement(fen: &str) -> Result<Board, FenError> {
    let board_part = fen.split_whitespace().next().ok_or(FenError::Empty)?;

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    let mut kings = [0usize; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = (BOARD_SIZE as usize - 1 - fen_rank_idx) as u8;
        let rank_number = BOARD_SIZE as usize - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=BOARD_SIZE as u32).contains(&empty_count) {
                    return Err(FenError::InvalidEmptyCount(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or(FenError::InvalidChar {
                rank: rank_number,
                ch,
            })?;

            if file >= BOARD_SIZE as usize {
                return Err(FenError::FileCount {
                    rank: rank_number,
                    files: file + 1,
                });
            }

            let square = Square {
                row,
                col: file as u8,
            };
            if kind == PieceKind::Pawn && (row == 0 || row == BOARD_SIZE - 1) {
                return Err(FenError::PawnOnBackRank(square));
            }
            if kind == PieceKind::King {
                kings[color.index()] += 1;
            }

            board.spawn(kind, color, square);
            file += 1;
        }

        if file != BOARD_SIZE as usize {
            return Err(FenError::FileCount {
                rank: rank_number,
                files: file,
            });
        }
    }

    for color in Color::BOTH {
        let count = kings[color.index()];
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok(board)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    PieceKind::from_fen_char(ch).map(|kind| (color, kind))
}
