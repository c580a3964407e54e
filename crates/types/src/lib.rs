//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data (with serde derives) so it can be shared by
//! the game engine, the move ledger and any external auditor that only reads
//! exported ledgers.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn**: horizontally centered, row 0
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default gravity ticker period (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `GRAVITY_STEP_MS` | 50 | Interval reduction per level |
//! | `GRAVITY_FLOOR_MS` | 50 | Fastest possible gravity |
//! | `MOVE_DELAY_MS` | 100 | Minimum spacing between player moves |
//!
//! # Gravity by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 950ms |
//! | 10 | 550ms |
//! | 20+ | 50ms (floor) |
//!
//! # Examples
//!
//! ```
//! use proof_tetris_types::{MoveType, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color(), "#800080");
//!
//! let mv = MoveType::from_str("hard_drop").unwrap();
//! assert_eq!(mv, MoveType::HardDrop);
//! assert!(mv.is_player_move());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

pub mod shape;
pub mod snapshot;

pub use shape::{Shape, MAX_SHAPE_SIZE};
pub use snapshot::{BoardGrid, GameSnapshot, PieceSnapshot};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default gravity ticker period in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u32 = 50;

/// Gravity never gets faster than this
pub const GRAVITY_FLOOR_MS: u32 = 50;

/// Minimum spacing between two accepted player moves
pub const MOVE_DELAY_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level of a freshly started session
pub const START_LEVEL: u32 = 1;

/// Points awarded per cell travelled during a hard drop
pub const HARD_DROP_CELL_SCORE: u32 = 1;

/// Line clear bonus table, multiplied by the current level.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use proof_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color of cells filled by this piece
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00ffff",
            PieceKind::O => "#ffff00",
            PieceKind::T => "#800080",
            PieceKind::S => "#00ff00",
            PieceKind::Z => "#ff0000",
            PieceKind::J => "#0000ff",
            PieceKind::L => "#ffa500",
        }
    }
}

/// Kinds of state transition a driver can request.
///
/// Five are player-initiated and subject to the move rate limit; `AutoDrop`
/// is the gravity tick and is exempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Move piece one cell down; never locks
    SoftDrop,
    /// Drop to the lowest valid row and lock
    HardDrop,
    /// Gravity tick driven by elapsed time
    AutoDrop,
}

impl MoveType {
    /// Every move type, player moves first.
    pub const ALL: [MoveType; 6] = [
        MoveType::MoveLeft,
        MoveType::MoveRight,
        MoveType::Rotate,
        MoveType::SoftDrop,
        MoveType::HardDrop,
        MoveType::AutoDrop,
    ];

    /// Parse from the wire name (`move_left`, `hard_drop`, ...)
    ///
    /// # Examples
    ///
    /// ```
    /// use proof_tetris_types::MoveType;
    ///
    /// assert_eq!(MoveType::from_str("move_left"), Some(MoveType::MoveLeft));
    /// assert_eq!(MoveType::from_str("AUTO_DROP"), Some(MoveType::AutoDrop));
    /// assert_eq!(MoveType::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "move_left" => Some(MoveType::MoveLeft),
            "move_right" => Some(MoveType::MoveRight),
            "rotate" => Some(MoveType::Rotate),
            "soft_drop" => Some(MoveType::SoftDrop),
            "hard_drop" => Some(MoveType::HardDrop),
            "auto_drop" => Some(MoveType::AutoDrop),
            _ => None,
        }
    }

    /// Convert to the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveType::MoveLeft => "move_left",
            MoveType::MoveRight => "move_right",
            MoveType::Rotate => "rotate",
            MoveType::SoftDrop => "soft_drop",
            MoveType::HardDrop => "hard_drop",
            MoveType::AutoDrop => "auto_drop",
        }
    }

    /// Whether the move comes from player input (and is rate limited)
    pub fn is_player_move(&self) -> bool {
        !matches!(self, MoveType::AutoDrop)
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind (its color token)
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_GRAVITY_MS, 1000);
        assert_eq!(GRAVITY_STEP_MS, 50);
        assert_eq!(GRAVITY_FLOOR_MS, 50);
        assert_eq!(MOVE_DELAY_MS, 100);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn move_type_wire_names_round_trip() {
        for mv in MoveType::ALL {
            assert_eq!(MoveType::from_str(mv.as_str()), Some(mv));
            let json = serde_json::to_string(&mv).unwrap();
            assert_eq!(json, format!("\"{}\"", mv.as_str()));
        }
    }

    #[test]
    fn only_auto_drop_is_exempt_from_rate_limit() {
        let exempt: Vec<_> = MoveType::ALL
            .iter()
            .filter(|m| !m.is_player_move())
            .collect();
        assert_eq!(exempt, vec![&MoveType::AutoDrop]);
    }

    #[test]
    fn piece_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PieceKind::J).unwrap(), "\"j\"");
        let parsed: PieceKind = serde_json::from_str("\"z\"").unwrap();
        assert_eq!(parsed, PieceKind::Z);
    }
}
