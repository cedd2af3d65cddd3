//! Square-indexed board representation.
//!
//! The board exclusively owns piece placement: an 8x8 grid where each slot
//! holds at most one [`Piece`]. A piece stored at square `S` always records
//! `piece.square == S`; [`Board::place`] is the only way pieces get on the
//! grid and it keeps the two in sync.

use std::collections::HashSet;

use crate::chess_errors::{FenError, InvariantViolation};
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;
use crate::utils::fen_parser::parse_placement;

const N: usize = BOARD_SIZE as usize;

/// Raw grid storage, `grid[row][col]`.
pub type Grid = [[Option<Piece>; N]; N];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    next_piece_id: PieceId,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            grid: [[None; N]; N],
            next_piece_id: 0,
        }
    }

    /// Build a board from the placement field of a FEN string.
    ///
    /// A full FEN is accepted; everything after the first space is ignored.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        parse_placement(placement)
    }

    #[inline]
    pub const fn is_in_bounds(row: i8, col: i8) -> bool {
        is_in_bounds(row, col)
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.grid[square.row as usize][square.col as usize].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.grid[square.row as usize][square.col as usize].as_mut()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Put `piece` on `square`, overwriting any occupant, and update the
    /// piece's own square. Legality is the caller's concern.
    #[inline]
    pub fn place(&mut self, mut piece: Piece, square: Square) {
        piece.square = square;
        self.grid[square.row as usize][square.col as usize] = Some(piece);
    }

    /// Empty a slot, returning whatever stood there.
    #[inline]
    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.grid[square.row as usize][square.col as usize].take()
    }

    /// Create a brand-new piece with a fresh id and place it.
    pub fn spawn(&mut self, kind: PieceKind, color: Color, square: Square) -> Piece {
        let piece = Piece {
            id: self.next_piece_id,
            kind,
            color,
            square,
            has_moved: false,
        };
        self.next_piece_id += 1;
        self.place(piece, square);
        piece
    }

    /// Snapshot of every piece in row-major order, optionally filtered by side.
    pub fn all_pieces(&self, owner: Option<Color>) -> Vec<Piece> {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .filter(|piece| owner.map_or(true, |color| piece.color == color))
            .copied()
            .collect()
    }

    pub fn find_piece(&self, id: PieceId) -> Option<&Piece> {
        self.grid.iter().flatten().flatten().find(|piece| piece.id == id)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .find(|piece| piece.kind == PieceKind::King && piece.color == color)
            .map(|piece| piece.square)
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics if the king is missing. Every game starts with one king per
    /// side and kings are never captured, so a missing king means the board
    /// is corrupted.
    pub fn expect_king(&self, color: Color) -> Square {
        match self.king_square(color) {
            Some(square) => square,
            None => panic!("board invariant violated: {color} has no king"),
        }
    }

    /// Run `probe` against the board with the piece on `from` provisionally
    /// moved to `to`, then restore the grid exactly as it was.
    ///
    /// Restoration happens in a drop guard, so it also covers early returns
    /// and unwinding out of `probe`. The captured occupant of `to` (if any) is
    /// simply overwritten for the duration of the probe.
    pub fn with_simulated_move<T>(
        &mut self,
        from: Square,
        to: Square,
        probe: impl FnOnce(&Board) -> T,
    ) -> T {
        let guard = SimulationGuard {
            saved: self.grid,
            board: self,
        };
        if let Some(piece) = guard.board.clear(from) {
            guard.board.place(piece, to);
        }
        let outcome = probe(&*guard.board);
        drop(guard);
        outcome
    }

    /// Check the structural invariants: grid/piece squares agree, no piece
    /// id appears twice, and each side has exactly one king.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        let mut kings = [0usize; 2];

        for (row, rank) in self.grid.iter().enumerate() {
            for (col, slot) in rank.iter().enumerate() {
                let Some(piece) = slot else { continue };
                let grid_square = Square {
                    row: row as u8,
                    col: col as u8,
                };
                if piece.square != grid_square {
                    return Err(InvariantViolation::SquareMismatch {
                        id: piece.id,
                        grid: grid_square,
                        recorded: piece.square,
                    });
                }
                if !seen.insert(piece.id) {
                    return Err(InvariantViolation::DuplicatePiece(piece.id));
                }
                if piece.kind == PieceKind::King {
                    kings[piece.color.index()] += 1;
                }
            }
        }

        for color in Color::BOTH {
            let count = kings[color.index()];
            if count != 1 {
                return Err(InvariantViolation::KingCount { color, count });
            }
        }

        Ok(())
    }
}

struct SimulationGuard<'a> {
    board: &'a mut Board,
    saved: Grid,
}

impl Drop for SimulationGuard<'_> {
    fn drop(&mut self) {
        self.board.grid = self.saved;
    }
}
