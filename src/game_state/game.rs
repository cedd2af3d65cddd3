//! The game aggregate: a [`Position`] plus lifecycle, clocks and freezing.
//!
//! Every move intent and every clock tick goes through here. A game only
//! accepts moves while `playing` and not frozen; after each committed move
//! the rules verdict is applied to the [`GameState`], and clock expiry or a
//! disconnect can end the game between moves.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::chess_errors::{GameError, MoveRejection};
use crate::config::GameConfig;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::clock::{ChessClock, ClockEvent, TimeSource};
use crate::game_state::game_state::{GameEndType, GameState, GameStatus};
use crate::game_state::position::Position;
use crate::moves::move_descriptions::{CommittedMove, MoveIntent, PotentialMove};

#[derive(Debug, Clone)]
pub struct Game {
    initial_board: Board,
    first_to_move: Color,
    position: Position,
    state: GameState,
    clock: ChessClock,
    time: Arc<dyn TimeSource>,
    frozen: bool,
    pending_replay: Vec<MoveIntent>,
}

impl Game {
    /// Set up a waiting game. The placement is validated now; the stored
    /// moves in `config` are replayed when the game starts.
    pub fn new(config: &GameConfig, time: Arc<dyn TimeSource>) -> Result<Self, GameError> {
        let board = Board::from_placement(&config.fen)?;
        let position = Position::new(board, config.first_to_move)?;

        Ok(Self {
            initial_board: board,
            first_to_move: config.first_to_move,
            position,
            state: GameState::waiting(),
            clock: ChessClock::new(
                config.time_for(Color::Light),
                config.time_for(Color::Dark),
                config.increment(),
            ),
            time,
            frozen: false,
            pending_replay: config.moves.clone(),
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn first_to_move(&self) -> Color {
        self.first_to_move
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn clock(&self) -> &ChessClock {
        &self.clock
    }

    pub fn remaining_time(&self, color: Color) -> Duration {
        self.clock.remaining(color, self.time.now())
    }

    /// Signed material balance from captures; positive favours white.
    pub fn material_advantage(&self) -> i32 {
        self.position.material_advantage(Color::Light)
    }

    pub fn merged_moves(&self) -> Vec<&CommittedMove> {
        self.position.merged_moves()
    }

    /// `waiting -> playing`: replay any stored moves, then start the clock of
    /// the side to move.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.state.start()?;
        info!(first_to_move = %self.first_to_move, "game started");

        self.replay_pending()?;
        if self.state.is_playing() {
            self.clock.start(self.side_to_move(), self.time.now());
        }
        Ok(())
    }

    /// Rebuild a game that already ended elsewhere: the stored moves are
    /// replayed onto the board and `stored` becomes the final state. The
    /// clocks never run and no move is accepted afterwards.
    pub fn restore_finished(&mut self, stored: GameState) -> Result<(), GameError> {
        let Some(end_type) = stored.end_type.filter(|_| stored.is_over()) else {
            return Err(GameError::InvalidTransition {
                from: stored.status,
                to: GameStatus::Over,
            });
        };

        self.state.start()?;
        self.replay_pending()?;
        if self.state.is_playing() {
            self.state.finish(end_type, stored.winner)?;
        }
        self.state = stored;
        info!(%end_type, winner = ?stored.winner, "finished game restored");
        Ok(())
    }

    fn replay_pending(&mut self) -> Result<(), GameError> {
        let replay = std::mem::take(&mut self.pending_replay);
        for (index, intent) in replay.iter().enumerate() {
            if !self.state.is_playing() {
                return Err(GameError::Replay {
                    index,
                    reason: MoveRejection::GameNotPlaying(self.state.status),
                });
            }
            let (_, verdict) = self
                .position
                .apply(intent)
                .map_err(|reason| GameError::Replay { index, reason })?;
            if let Some((end_type, winner)) = verdict.outcome() {
                self.conclude(end_type, winner);
            }
        }
        if !replay.is_empty() {
            debug!(moves = replay.len(), "stored moves replayed");
        }
        Ok(())
    }

    /// Legal destinations for the piece on `square`. Nothing is offered
    /// unless the game is being played and is not frozen.
    pub fn legal_moves(&mut self, square: Square) -> Vec<PotentialMove> {
        if !self.state.is_playing() || self.frozen {
            return Vec::new();
        }
        self.position.legal_moves(square)
    }

    /// Every legal intent for the side to move, promotions expanded.
    pub fn legal_intents(&mut self) -> Vec<MoveIntent> {
        if !self.state.is_playing() || self.frozen {
            return Vec::new();
        }
        self.position.legal_intents()
    }

    /// Validate and commit a move intent, then advance the state machine.
    pub fn submit_move(&mut self, intent: MoveIntent) -> Result<CommittedMove, MoveRejection> {
        self.tick();
        if !self.state.is_playing() {
            return Err(MoveRejection::GameNotPlaying(self.state.status));
        }
        if self.frozen {
            return Err(MoveRejection::Frozen);
        }

        let (record, verdict) = self.position.apply(&intent).map_err(|reason| {
            debug!(from = %intent.from, to = %intent.to, %reason, "move rejected");
            reason
        })?;

        match verdict.outcome() {
            Some((end_type, winner)) => self.conclude(end_type, winner),
            None => self.clock.press(self.time.now()),
        }
        Ok(record)
    }

    /// Poll the clock; ends the game on expiry. Returns the clock events so
    /// callers can refresh displays.
    pub fn tick(&mut self) -> Vec<ClockEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        let events = self.clock.poll(self.time.now());
        for event in &events {
            if let ClockEvent::Expired { color } = *event {
                self.conclude(GameEndType::Time, Some(color.opposite()));
            }
        }
        events
    }

    /// The opponent of `color` wins after `color` failed to reconnect.
    pub fn disconnect(&mut self, color: Color) -> Result<(), GameError> {
        self.clock.pause(self.time.now());
        self.state.finish(GameEndType::Disconnect, Some(color.opposite()))?;
        info!(disconnected = %color, "game over by disconnect");
        Ok(())
    }

    /// Stop both clocks and refuse moves until [`Game::unfreeze`].
    pub fn freeze(&mut self) {
        if self.frozen {
            return;
        }
        self.frozen = true;
        self.clock.pause(self.time.now());
        debug!("game frozen");
    }

    pub fn unfreeze(&mut self) {
        if !self.frozen {
            return;
        }
        self.frozen = false;
        if self.state.is_playing() {
            self.clock.start(self.side_to_move(), self.time.now());
        }
        debug!("game unfrozen");
    }

    /// Overwrite a side's clock, e.g. from a resumed room document.
    pub fn set_remaining_time(&mut self, color: Color, remaining: Duration) {
        self.clock.set_remaining(color, remaining, self.time.now());
    }

    /// Read-only position after the first `ply` moves, rebuilt from the
    /// starting placement. The live game is not touched.
    pub fn position_at(&self, ply: usize) -> Result<Position, GameError> {
        let moves = self.merged_moves();
        if ply > moves.len() {
            return Err(GameError::PlyOutOfRange {
                requested: ply,
                available: moves.len(),
            });
        }

        let mut scrubbed = Position::new(self.initial_board, self.first_to_move)?;
        for (index, record) in moves.iter().take(ply).enumerate() {
            scrubbed
                .apply(&record.intent())
                .map_err(|reason| GameError::Replay { index, reason })?;
        }
        Ok(scrubbed)
    }

    fn conclude(&mut self, end_type: GameEndType, winner: Option<Color>) {
        self.clock.pause(self.time.now());
        if self.state.finish(end_type, winner).is_ok() {
            info!(%end_type, winner = ?winner, "game over");
        }
    }
}
