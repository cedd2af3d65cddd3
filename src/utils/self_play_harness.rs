//! Random-vs-random game runner for local testing.

use std::sync::Arc;
use std::time::Duration;

use crate::chess_errors::GameError;
use crate::config::GameConfig;
use crate::engines::random_mover::RandomMover;
use crate::game_state::chess_types::Color;
use crate::game_state::clock::ManualTime;
use crate::game_state::game::Game;
use crate::game_state::game_state::GameState;
use crate::utils::move_list::write_game_record;

#[derive(Debug, Clone)]
pub struct SelfPlayReport {
    pub state: GameState,
    pub plies: usize,
    pub advantage: i32,
    pub record: String,
}

/// Play seeded random movers against each other until the game ends or
/// `max_plies` moves have been made. Each move costs `think_time` on the
/// mover's clock.
pub fn play_random_game(
    config: &GameConfig,
    seed: u64,
    max_plies: usize,
    think_time: Duration,
) -> Result<(SelfPlayReport, Game), GameError> {
    let time = Arc::new(ManualTime::new());
    let mut game = Game::new(config, time.clone())?;
    game.start()?;

    let mut white = RandomMover::seeded(seed);
    let mut black = RandomMover::seeded(seed.wrapping_add(1));
    let mut plies = 0usize;

    while plies < max_plies && game.state().is_playing() {
        time.advance(think_time);
        game.tick();

        let mover = match game.side_to_move() {
            Color::Light => &mut white,
            Color::Dark => &mut black,
        };
        let Some(intent) = mover.choose_move(&mut game) else {
            break;
        };
        if game.submit_move(intent).is_err() {
            break;
        }
        plies += 1;
    }

    let report = SelfPlayReport {
        state: game.state(),
        plies,
        advantage: game.material_advantage(),
        record: write_game_record(&game),
    };
    Ok((report, game))
}
