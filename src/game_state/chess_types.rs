//! Core value types shared by every layer of the rules engine.
//!
//! Squares use `(row, col)` coordinates where row 0 is rank 1 (White's back
//! rank) and col 0 is the a-file. Pieces are small `Copy` records that carry
//! their own square; the board is responsible for keeping the two in sync.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::BOARD_SIZE;

/// Side of a player or piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[serde(rename = "white")]
    Light,
    #[serde(rename = "black")]
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn step for this side.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => BOARD_SIZE - 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => BOARD_SIZE - 2,
        }
    }

    /// Row a pawn of this side must stand on to capture en passant
    /// (rank 5 for White, rank 4 for Black).
    #[inline]
    pub const fn en_passant_row(self) -> u8 {
        match self {
            Color::Light => 4,
            Color::Dark => 3,
        }
    }

    /// Farthest row from this side, where its pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().back_row()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "white",
            Color::Dark => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece kind (color is carried separately on [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value used for capture-advantage bookkeeping.
    ///
    /// The king carries a value of 9 for symmetry with the queen, but it is
    /// never actually captured.
    #[inline]
    pub const fn value(self) -> u8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 9,
        }
    }

    /// Lowercase placement letter (`p n b r q k`).
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Letter used in move annotations; empty for pawns.
    pub const fn annotation_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Kinds a pawn may turn into.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// A board coordinate. Both fields are always within `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Build a square, returning `None` for coordinates off the board.
    #[inline]
    pub fn new(row: i8, col: i8) -> Option<Self> {
        if is_in_bounds(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Square reached by stepping `(d_row, d_col)` from here, if on the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::new(self.row as i8 + d_row, self.col as i8 + d_col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        write!(f, "{file}{}", self.row + 1)
    }
}

/// True iff both coordinates are within `[0, BOARD_SIZE)`.
#[inline]
pub const fn is_in_bounds(row: i8, col: i8) -> bool {
    row >= 0 && row < BOARD_SIZE as i8 && col >= 0 && col < BOARD_SIZE as i8
}

/// Stable identity of a piece for the lifetime of one game.
pub type PieceId = u16;

/// A piece on the board. The same id follows the piece from square to square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn value(&self) -> u8 {
        self.kind.value()
    }

    /// Placement letter, uppercase for White.
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::Light => self.kind.fen_char().to_ascii_uppercase(),
            Color::Dark => self.kind.fen_char(),
        }
    }
}
