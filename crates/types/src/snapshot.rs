//! Value snapshots of a game session.
//!
//! These are what the move ledger stores and hashes. They are plain `Copy`
//! data built by field copy from the live session, never by a
//! serialize/parse round trip.

use serde::{Deserialize, Serialize};

use crate::{Cell, PieceKind, Shape, BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

/// Row-major board grid, row 0 at the top
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub current_piece: Option<PieceSnapshot>,
    pub next_piece: Option<PieceSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Number of non-empty board cells
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current_piece: None,
            next_piece: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            game_over: false,
        }
    }
}
