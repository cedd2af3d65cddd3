//! Uniformly random mover.
//!
//! Picks any legal intent for the side to move. Used for self-play,
//! diagnostics and randomised playout tests; seeded movers replay the same
//! game every time.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game_state::game::Game;
use crate::moves::move_descriptions::MoveIntent;

pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A legal intent for the side to move, or `None` when the game offers
    /// no moves (not playing, frozen, or no legal move).
    pub fn choose_move(&mut self, game: &mut Game) -> Option<MoveIntent> {
        let intents = game.legal_intents();
        intents.choose(&mut self.rng).copied()
    }
}
