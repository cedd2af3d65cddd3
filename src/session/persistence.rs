//! Write-behind storage for room documents.
//!
//! A room document mirrors a match: starting placement, the moves played,
//! each side's remaining time, the status and the material advantage. The
//! game only reads it once, to rebuild itself after a reconnect; afterwards
//! every write is best-effort and a failing sink never blocks play.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chess_errors::{MoveRejection, PersistenceError};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{CommittedMove, MoveIntent};
use crate::utils::annotation::annotate;

/// A committed move as stored in a room document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMove {
    pub from_row: i8,
    pub from_col: i8,
    pub to_row: i8,
    pub to_col: i8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promote_to: Option<PieceKind>,
    #[serde(default)]
    pub annotation: String,
}

impl From<&CommittedMove> for StoredMove {
    fn from(record: &CommittedMove) -> Self {
        Self {
            from_row: record.from.row as i8,
            from_col: record.from.col as i8,
            to_row: record.to.row as i8,
            to_col: record.to.col as i8,
            promote_to: record.promoted_to,
            annotation: annotate(record),
        }
    }
}

impl TryFrom<&StoredMove> for MoveIntent {
    type Error = MoveRejection;

    fn try_from(stored: &StoredMove) -> Result<Self, Self::Error> {
        let intent = MoveIntent::from_coords(stored.from_row, stored.from_col, stored.to_row, stored.to_col)?;
        Ok(match stored.promote_to {
            Some(kind) => intent.with_promotion(kind),
            None => intent,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSlot {
    pub color: Color,
    /// Remaining time in milliseconds, rounded up.
    pub time_left_ms: u64,
}

impl PlayerSlot {
    pub fn new(color: Color, time_left: Duration) -> Self {
        Self {
            color,
            time_left_ms: millis_rounded_up(time_left),
        }
    }

    pub fn time_left(&self) -> Duration {
        Duration::from_millis(self.time_left_ms)
    }
}

/// Whole milliseconds, rounded up so a side with time left never stores zero.
fn millis_rounded_up(time_left: Duration) -> u64 {
    u64::try_from(time_left.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDocument {
    pub room_name: String,
    pub room_status: GameState,
    pub players: Vec<PlayerSlot>,
    pub moves: Vec<StoredMove>,
    pub fen_string: String,
    pub first_to_move: Color,
    pub advantage: i32,
    pub updated_at: DateTime<Utc>,
}

impl RoomDocument {
    pub fn new(room_name: &str, fen: &str, first_to_move: Color, time_left: Duration) -> Self {
        Self {
            room_name: room_name.to_owned(),
            room_status: GameState::waiting(),
            players: Color::BOTH
                .iter()
                .map(|&color| PlayerSlot::new(color, time_left))
                .collect(),
            moves: Vec::new(),
            fen_string: fen.to_owned(),
            first_to_move,
            advantage: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn time_left(&self, color: Color) -> Option<Duration> {
        self.players
            .iter()
            .find(|slot| slot.color == color)
            .map(PlayerSlot::time_left)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Storage backend for room documents.
///
/// Implementors provide whole-document load and save; the incremental
/// updates are read-modify-write on top of those.
pub trait PersistenceSink: Send {
    fn load_room(&self, room: &str) -> Result<RoomDocument, PersistenceError>;

    fn save_room(&mut self, doc: &RoomDocument) -> Result<(), PersistenceError>;

    fn append_move(&mut self, room: &str, mv: StoredMove, advantage: i32) -> Result<(), PersistenceError> {
        let mut doc = self.load_room(room)?;
        doc.moves.push(mv);
        doc.advantage = advantage;
        doc.touch();
        self.save_room(&doc)
    }

    fn update_time(&mut self, room: &str, color: Color, time_left: Duration) -> Result<(), PersistenceError> {
        let mut doc = self.load_room(room)?;
        let slot = PlayerSlot::new(color, time_left);
        match doc.players.iter_mut().find(|existing| existing.color == color) {
            Some(existing) => *existing = slot,
            None => doc.players.push(slot),
        }
        doc.touch();
        self.save_room(&doc)
    }

    fn update_status(&mut self, room: &str, state: GameState) -> Result<(), PersistenceError> {
        let mut doc = self.load_room(room)?;
        doc.room_status = state;
        doc.touch();
        self.save_room(&doc)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryRoomStore {
    rooms: HashMap<String, RoomDocument>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl PersistenceSink for MemoryRoomStore {
    fn load_room(&self, room: &str) -> Result<RoomDocument, PersistenceError> {
        self.rooms
            .get(room)
            .cloned()
            .ok_or_else(|| PersistenceError::UnknownRoom(room.to_owned()))
    }

    fn save_room(&mut self, doc: &RoomDocument) -> Result<(), PersistenceError> {
        self.rooms.insert(doc.room_name.clone(), doc.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per room under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileRoomStore {
    dir: PathBuf,
}

impl JsonFileRoomStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// ASCII letters, digits and `-` are kept; every other byte becomes `_`
    /// followed by two hex digits, so distinct rooms never share a file.
    fn path_for(&self, room: &str) -> PathBuf {
        let mut safe = String::with_capacity(room.len());
        for byte in room.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                safe.push(char::from(byte));
            } else {
                safe.push_str(&format!("_{byte:02x}"));
            }
        }
        self.dir.join(format!("{safe}.json"))
    }
}

impl PersistenceSink for JsonFileRoomStore {
    fn load_room(&self, room: &str) -> Result<RoomDocument, PersistenceError> {
        let text = match fs::read_to_string(self.path_for(room)) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::UnknownRoom(room.to_owned()))
            }
            Err(err) => return Err(err.into()),
        };
        let doc: RoomDocument = serde_json::from_str(&text)?;
        if doc.room_name != room {
            return Err(PersistenceError::RoomMismatch {
                requested: room.to_owned(),
                found: doc.room_name,
            });
        }
        Ok(doc)
    }

    fn save_room(&mut self, doc: &RoomDocument) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(self.path_for(&doc.room_name), json)?;
        Ok(())
    }
}
