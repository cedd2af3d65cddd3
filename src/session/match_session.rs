//! One match as seen by the outer layers.
//!
//! A `MatchSession` wraps a [`Game`] with its room document: every committed
//! move and clock update is written behind to the sink, the end of the game
//! is announced once to every termination listener, and a session can be
//! rebuilt from the stored document after a reconnect. Turns are processed
//! one at a time; share a session between tasks through [`SharedSession`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{info, warn};

use crate::chess_errors::{GameError, MoveRejection, PersistenceError, SessionError};
use crate::config::GameConfig;
use crate::game_state::chess_types::Color;
use crate::game_state::clock::{ClockEvent, ClockObserver, TimeSource};
use crate::game_state::game::Game;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{CommittedMove, MoveIntent};
use crate::session::persistence::{PersistenceSink, RoomDocument, StoredMove};

/// Receives the final `{status, winner, endType}` of a match.
pub trait TerminationListener: Send {
    fn on_game_over(&mut self, room: &str, state: &GameState);
}

pub type SharedSession<S> = Arc<Mutex<MatchSession<S>>>;

pub struct MatchSession<S: PersistenceSink> {
    room: String,
    game: Game,
    sink: S,
    listeners: Vec<Box<dyn TerminationListener>>,
    announced: bool,
}

impl<S: PersistenceSink> MatchSession<S> {
    /// Create a new room from `config` and store its initial document.
    pub fn open(
        room: &str,
        config: &GameConfig,
        time: Arc<dyn TimeSource>,
        mut sink: S,
    ) -> Result<Self, GameError> {
        let game = Game::new(config, time)?;
        let doc = RoomDocument::new(
            room,
            &config.fen,
            config.first_to_move,
            Duration::from_secs(config.initial_time_secs),
        );
        log_failure(room, "create room", sink.save_room(&doc));

        Ok(Self {
            room: room.to_owned(),
            game,
            sink,
            listeners: Vec::new(),
            announced: false,
        })
    }

    /// Rebuild a room from its stored document. The stored moves are
    /// replayed and remaining times restored. A room stored as `over` comes
    /// back finished, with its stored result and stopped clocks; any other
    /// room is started.
    pub fn resume(
        room: &str,
        base: &GameConfig,
        time: Arc<dyn TimeSource>,
        sink: S,
    ) -> Result<Self, SessionError> {
        let doc = sink.load_room(room)?;
        let moves = doc
            .moves
            .iter()
            .enumerate()
            .map(|(index, stored)| {
                MoveIntent::try_from(stored).map_err(|reason| GameError::Replay { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = GameConfig {
            fen: doc.fen_string.clone(),
            first_to_move: doc.first_to_move,
            moves,
            ..base.clone()
        };
        let mut game = Game::new(&config, time)?;
        for color in Color::BOTH {
            if let Some(left) = doc.time_left(color) {
                game.set_remaining_time(color, left);
            }
        }

        let finished = doc.room_status.is_over();
        let mut session = Self {
            room: room.to_owned(),
            game,
            sink,
            listeners: Vec::new(),
            announced: finished,
        };
        if finished {
            session.game.restore_finished(doc.room_status)?;
        } else {
            session.start()?;
        }
        info!(room, moves = doc.moves.len(), finished, "room resumed");
        Ok(session)
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn add_listener(&mut self, listener: Box<dyn TerminationListener>) {
        self.listeners.push(listener);
    }

    pub fn into_shared(self) -> SharedSession<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        self.game.start()?;
        self.persist_status();
        self.announce_if_over();
        Ok(())
    }

    /// Tick the clocks through the session first, so display updates and a
    /// flag fall are written before the move is judged.
    pub fn submit_move(&mut self, intent: MoveIntent) -> Result<CommittedMove, MoveRejection> {
        self.tick();
        let result = self.game.submit_move(intent);

        if let Ok(record) = &result {
            let advantage = self.game.material_advantage();
            let outcome = self
                .sink
                .append_move(&self.room, StoredMove::from(record), advantage);
            log_failure(&self.room, "append move", outcome);
        }
        self.announce_if_over();
        result
    }

    /// Poll the clocks, persisting display updates and ending the game on
    /// expiry.
    pub fn tick(&mut self) -> Vec<ClockEvent> {
        let events = self.game.tick();
        let mut writer = TimeWriter {
            room: &self.room,
            sink: &mut self.sink,
        };
        for event in &events {
            event.dispatch(&mut writer);
        }
        self.announce_if_over();
        events
    }

    pub fn disconnect(&mut self, color: Color) -> Result<(), GameError> {
        self.game.disconnect(color)?;
        self.announce_if_over();
        Ok(())
    }

    pub fn freeze(&mut self) {
        self.game.freeze();
        self.persist_times();
    }

    pub fn unfreeze(&mut self) {
        self.game.unfreeze();
    }

    fn persist_status(&mut self) {
        let outcome = self.sink.update_status(&self.room, self.game.state());
        log_failure(&self.room, "update status", outcome);
    }

    fn persist_times(&mut self) {
        for color in Color::BOTH {
            let left = self.game.remaining_time(color);
            let outcome = self.sink.update_time(&self.room, color, left);
            log_failure(&self.room, "update time", outcome);
        }
    }

    fn announce_if_over(&mut self) {
        let state = self.game.state();
        if self.announced || !state.is_over() {
            return;
        }
        self.announced = true;
        self.persist_status();
        self.persist_times();
        for listener in &mut self.listeners {
            listener.on_game_over(&self.room, &state);
        }
    }
}

struct TimeWriter<'a, S: PersistenceSink> {
    room: &'a str,
    sink: &'a mut S,
}

impl<S: PersistenceSink> ClockObserver for TimeWriter<'_, S> {
    fn on_display(&mut self, color: Color, remaining: Duration) {
        let outcome = self.sink.update_time(self.room, color, remaining);
        log_failure(self.room, "update time", outcome);
    }

    fn on_expired(&mut self, color: Color) {
        let outcome = self.sink.update_time(self.room, color, Duration::ZERO);
        log_failure(self.room, "update time", outcome);
    }
}

fn log_failure(room: &str, action: &str, outcome: Result<(), PersistenceError>) {
    if let Err(err) = outcome {
        warn!(room, action, error = %err, "persistence write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchSession, TerminationListener};
    use crate::config::GameConfig;
    use crate::game_state::chess_types::{Color, Square};
    use crate::game_state::clock::ManualTime;
    use crate::chess_errors::MoveRejection;
    use crate::game_state::game_state::{GameEndType, GameState, GameStatus};
    use crate::moves::move_descriptions::MoveIntent;
    use crate::session::persistence::{MemoryRoomStore, PersistenceSink};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn sq(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    struct Collect(Arc<Mutex<Vec<GameState>>>);

    impl TerminationListener for Collect {
        fn on_game_over(&mut self, _room: &str, state: &GameState) {
            self.0.lock().expect("listener lock").push(*state);
        }
    }

    #[test]
    fn moves_are_written_behind_and_termination_announced_once() {
        let config = GameConfig {
            fen: "7k/5Q2/5K2/8/8/8/8/8".to_owned(),
            ..GameConfig::default()
        };
        let time = Arc::new(ManualTime::new());
        let mut session =
            MatchSession::open("mate", &config, time, MemoryRoomStore::new()).expect("session opens");
        let seen = Arc::new(Mutex::new(Vec::new()));
        session.add_listener(Box::new(Collect(seen.clone())));
        session.start().expect("session starts");

        session
            .submit_move(MoveIntent::new(sq(6, 5), sq(6, 6)))
            .expect("Qg7 is legal");
        session.tick();
        assert!(session.disconnect(Color::Dark).is_err());

        let announced = seen.lock().expect("listener lock").clone();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].end_type, Some(GameEndType::Checkmate));

        let doc = session.sink().load_room("mate").expect("room was stored");
        assert_eq!(doc.moves.len(), 1);
        assert_eq!(doc.moves[0].annotation, "Qg7#");
        assert!(doc.room_status.is_over());
    }

    #[test]
    fn resume_replays_stored_moves_and_times() {
        let time = Arc::new(ManualTime::new());
        let mut first = MatchSession::open("room", &GameConfig::default(), time.clone(), MemoryRoomStore::new())
            .expect("session opens");
        first.start().expect("session starts");
        first
            .submit_move(MoveIntent::new(sq(1, 4), sq(3, 4)))
            .expect("e4 is legal");
        time.advance(Duration::from_secs(30));
        first.freeze();

        let store = first.sink().clone();
        let resumed = MatchSession::resume("room", &GameConfig::default(), time, store)
            .expect("stored room resumes");
        assert_eq!(resumed.game().merged_moves().len(), 1);
        assert_eq!(resumed.game().side_to_move(), Color::Dark);
        assert_eq!(resumed.game().remaining_time(Color::Dark), Duration::from_secs(1170));
    }

    fn resume_finished(
        room: &str,
        store: MemoryRoomStore,
        time: Arc<ManualTime>,
        expected: GameState,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut resumed = MatchSession::resume(room, &GameConfig::default(), time.clone(), store)
            .expect("a finished room still resumes");
        resumed.add_listener(Box::new(Collect(seen.clone())));

        assert_eq!(resumed.game().state(), expected);
        assert_eq!(
            resumed.submit_move(MoveIntent::new(sq(6, 4), sq(4, 4))),
            Err(MoveRejection::GameNotPlaying(GameStatus::Over))
        );
        time.advance(Duration::from_secs(30));
        assert!(resumed.tick().is_empty());

        let doc = resumed.sink().load_room(room).expect("room is still stored");
        assert_eq!(doc.room_status, expected);
        assert_eq!(doc.moves.len(), 1);
        assert!(seen.lock().expect("listener lock").is_empty());
    }

    #[test]
    fn room_ended_by_disconnect_resumes_finished() {
        let time = Arc::new(ManualTime::new());
        let mut first = MatchSession::open("left", &GameConfig::default(), time.clone(), MemoryRoomStore::new())
            .expect("session opens");
        first.start().expect("session starts");
        first
            .submit_move(MoveIntent::new(sq(1, 4), sq(3, 4)))
            .expect("e4 is legal");
        first.disconnect(Color::Dark).expect("playing game can end by disconnect");
        let expected = first.game().state();
        assert_eq!(expected.end_type, Some(GameEndType::Disconnect));

        resume_finished("left", first.sink().clone(), time, expected);
    }

    #[test]
    fn room_ended_on_time_resumes_finished() {
        let config = GameConfig {
            initial_time_secs: 5,
            ..GameConfig::default()
        };
        let time = Arc::new(ManualTime::new());
        let mut first = MatchSession::open("flag", &config, time.clone(), MemoryRoomStore::new())
            .expect("session opens");
        first.start().expect("session starts");
        first
            .submit_move(MoveIntent::new(sq(1, 4), sq(3, 4)))
            .expect("e4 is legal");
        time.advance(Duration::from_secs(6));
        first.tick();
        let expected = first.game().state();
        assert_eq!(expected.end_type, Some(GameEndType::Time));
        assert_eq!(expected.winner, Some(Color::Light));

        resume_finished("flag", first.sink().clone(), time, expected);
    }

    #[test]
    fn sub_second_remaining_time_survives_a_resume() {
        let time = Arc::new(ManualTime::new());
        let mut first = MatchSession::open("close", &GameConfig::default(), time.clone(), MemoryRoomStore::new())
            .expect("session opens");
        first.start().expect("session starts");

        let mut store = first.sink().clone();
        store
            .update_time("close", Color::Light, Duration::from_millis(600))
            .expect("room exists");
        let mut resumed = MatchSession::resume("close", &GameConfig::default(), time.clone(), store)
            .expect("stored room resumes");

        assert_eq!(resumed.game().remaining_time(Color::Light), Duration::from_millis(600));
        resumed.tick();
        assert!(resumed.game().state().is_playing());
        time.advance(Duration::from_millis(700));
        resumed.tick();
        assert_eq!(resumed.game().state().end_type, Some(GameEndType::Time));
    }

    #[test]
    fn clock_display_is_written_when_a_move_arrives() {
        let time = Arc::new(ManualTime::new());
        let mut session = MatchSession::open("display", &GameConfig::default(), time.clone(), MemoryRoomStore::new())
            .expect("session opens");
        session.start().expect("session starts");
        session.tick();

        time.advance(Duration::from_millis(4_500));
        session
            .submit_move(MoveIntent::new(sq(1, 4), sq(3, 4)))
            .expect("e4 is legal");

        let doc = session.sink().load_room("display").expect("room was stored");
        assert_eq!(doc.time_left(Color::Light), Some(Duration::from_millis(1_195_500)));
    }

    #[test]
    fn clock_expiry_through_ticks_reaches_listeners() {
        let config = GameConfig {
            initial_time_secs: 2,
            ..GameConfig::default()
        };
        let time = Arc::new(ManualTime::new());
        let mut session = MatchSession::open("slow", &config, time.clone(), MemoryRoomStore::new())
            .expect("session opens");
        let seen = Arc::new(Mutex::new(Vec::new()));
        session.add_listener(Box::new(Collect(seen.clone())));
        session.start().expect("session starts");

        time.advance(Duration::from_secs(3));
        session.tick();

        let announced = seen.lock().expect("listener lock").clone();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].winner, Some(Color::Dark));
        let doc = session.sink().load_room("slow").expect("room was stored");
        assert_eq!(doc.time_left(Color::Light), Some(Duration::ZERO));
    }
}
