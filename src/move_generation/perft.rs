//! Perft: exhaustive move-path counting to a fixed depth.
//!
//! Walks every legal move sequence from a position and tallies the leaf
//! moves by kind. Promotions are expanded into one move per promotion piece
//! so totals line up with published reference counts.

use crate::game_state::position::Position;
use crate::moves::move_descriptions::{CommittedMove, MoveIntent, SpecialMove};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, record: &CommittedMove) {
        self.nodes += 1;
        if record.is_capture() {
            self.captures += 1;
        }
        match record.special_move {
            Some(SpecialMove::EnPassant) => self.en_passant += 1,
            Some(SpecialMove::CastleShort | SpecialMove::CastleLong) => self.castles += 1,
            Some(SpecialMove::Promotion) => self.promotions += 1,
            None => {}
        }
        if record.check {
            self.checks += 1;
        }
        if record.checkmate {
            self.checkmates += 1;
        }
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(position, depth, &mut counts);
    counts
}

/// Node counts below each root move, keyed by the root intent.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(MoveIntent, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut root = position.clone();
    root.legal_intents()
        .into_iter()
        .filter_map(|intent| {
            let mut child = position.clone();
            child.apply(&intent).ok()?;
            Some((intent, perft(&child, depth - 1).nodes))
        })
        .collect()
}

fn perft_recurse(position: &Position, depth: u8, counts: &mut PerftCounts) {
    let mut scratch = position.clone();
    for intent in scratch.legal_intents() {
        let mut child = position.clone();
        let Ok((record, _)) = child.apply(&intent) else {
            continue;
        };

        if depth == 1 {
            counts.record_leaf(&record);
        } else {
            let mut below = PerftCounts::default();
            perft_recurse(&child, depth - 1, &mut below);
            counts.merge(below);
        }
    }
}
