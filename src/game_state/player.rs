//! Per-side bookkeeping: which pieces are still in play, the moves made and
//! the material captured.

use std::collections::BTreeSet;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::CommittedMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    roster: BTreeSet<PieceId>,
    move_log: Vec<CommittedMove>,
    captures: Vec<Piece>,
}

impl Player {
    /// A fresh player whose roster is every piece of `color` on `board`.
    pub fn new(color: Color, board: &Board) -> Self {
        Self {
            color,
            roster: board
                .all_pieces(Some(color))
                .iter()
                .map(|piece| piece.id)
                .collect(),
            move_log: Vec::new(),
            captures: Vec::new(),
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn roster(&self) -> &BTreeSet<PieceId> {
        &self.roster
    }

    pub fn move_log(&self) -> &[CommittedMove] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<&CommittedMove> {
        self.move_log.last()
    }

    /// Enemy pieces this player has taken, in capture order.
    pub fn captures(&self) -> &[Piece] {
        &self.captures
    }

    pub fn captured_value(&self) -> u32 {
        self.captures.iter().map(|piece| u32::from(piece.value())).sum()
    }

    pub(crate) fn enlist(&mut self, id: PieceId) {
        self.roster.insert(id);
    }

    pub(crate) fn retire(&mut self, id: PieceId) {
        self.roster.remove(&id);
    }

    pub(crate) fn record_capture(&mut self, piece: Piece) {
        self.captures.push(piece);
    }

    pub(crate) fn log_move(&mut self, record: CommittedMove) {
        self.move_log.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::Player;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind, Square};

    #[test]
    fn roster_starts_with_every_piece_of_the_side() {
        let board = Board::from_placement(STARTING_POSITION_FEN).expect("start position should parse");
        let white = Player::new(Color::Light, &board);
        assert_eq!(white.roster().len(), 16);
        assert!(white.move_log().is_empty());
        assert_eq!(white.captured_value(), 0);
    }

    #[test]
    fn capture_values_accumulate() {
        let mut board = Board::empty();
        let queen = board.spawn(PieceKind::Queen, Color::Dark, Square { row: 3, col: 3 });
        let knight = board.spawn(PieceKind::Knight, Color::Dark, Square { row: 4, col: 4 });
        let mut white = Player::new(Color::Light, &board);
        white.record_capture(queen);
        white.record_capture(knight);
        assert_eq!(white.captured_value(), 12);
        assert_eq!(white.captures().len(), 2);
    }
}
