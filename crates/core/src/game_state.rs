//! Game state module - the mechanics of one game session
//!
//! Ties together board, pieces, piece source and scoring: moving and rotating
//! the falling piece, gravity, locking, line clears and game over. Nothing in
//! here knows about the ledger or rate limiting; see [`crate::engine`].

use tracing::debug;

use crate::board::Board;
use crate::pieces::Piece;
use crate::rng::PieceSource;
use crate::scoring::{gravity_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
use crate::types::{GameSnapshot, START_LEVEL};

/// Board, falling pieces, counters and gravity for one game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    source: PieceSource,
    score: u32,
    level: u32,
    lines: u32,
    /// Milliseconds of gravity accumulated since the last gravity step
    gravity_ms: u32,
    game_over: bool,
}

impl GameSession {
    /// Start a game: empty board, first two pieces drawn from `source`
    pub fn new(source: PieceSource) -> Self {
        let mut session = Self {
            board: Board::new(),
            current: None,
            next: None,
            source,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            gravity_ms: 0,
            game_over: false,
        };
        session.spawn_initial();
        session
    }

    /// Throw the game away and start over, keeping the piece source
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.gravity_ms = 0;
        self.game_over = false;
        self.spawn_initial();
    }

    fn spawn_initial(&mut self) {
        let current = Piece::spawn(&mut self.source);
        self.next = Some(Piece::spawn(&mut self.source));
        self.current = Some(current);
        if !self.fits(&current) {
            self.game_over = true;
        }
    }

    fn fits(&self, piece: &Piece) -> bool {
        self.board.fits(piece)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for building scenarios in tests
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    /// Current gravity interval, derived from the level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    /// Gravity accumulated towards the next step
    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    /// Value copy of the whole session
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.rows(),
            current_piece: self.current.map(Into::into),
            next_piece: self.next.map(Into::into),
            score: self.score,
            level: self.level,
            lines: self.lines,
            game_over: self.game_over,
        }
    }

    /// Try to move the current piece; false (and no change) if blocked
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let moved = current.shifted(dx, dy);
        if self.fits(&moved) {
            self.current = Some(moved);
            return true;
        }

        false
    }

    /// Rotate the current piece clockwise in place; no wall kicks
    pub fn try_rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let rotated = current.rotated();
        if self.fits(&rotated) {
            self.current = Some(rotated);
            return true;
        }

        false
    }

    /// Drop the current piece as far as it goes, then lock it.
    ///
    /// Returns the number of rows fallen; each one is worth a point.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over || self.current.is_none() {
            return 0;
        }

        let mut drop_distance: u32 = 0;
        while self.try_move(0, 1) {
            drop_distance += 1;
        }
        self.score = self.score.saturating_add(hard_drop_score(drop_distance));

        self.lock_piece();
        drop_distance
    }

    /// Feed `elapsed_ms` of gravity.
    ///
    /// Once the accumulator reaches the gravity interval it resets and the
    /// piece moves down one row, locking if it cannot. Returns whether gravity
    /// fired.
    pub fn gravity_tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);
        if self.gravity_ms < self.gravity_interval_ms() {
            return false;
        }

        self.gravity_ms = 0;
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Write the current piece into the board, clear lines, score, and bring
    /// in the next piece. Returns the number of lines cleared.
    pub fn lock_piece(&mut self) -> usize {
        let Some(current) = self.current.take() else {
            return 0;
        };

        self.board.lock(&current);
        let cleared = self.board.clear_full_rows();

        if cleared > 0 {
            let points = line_clear_score(cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared as u32);
            self.level = level_for_lines(self.lines);
        }

        let promoted = self
            .next
            .take()
            .unwrap_or_else(|| Piece::spawn(&mut self.source));
        self.next = Some(Piece::spawn(&mut self.source));
        self.current = Some(promoted);
        if !self.fits(&promoted) {
            self.game_over = true;
        }

        debug!(
            kind = current.kind.as_str(),
            x = current.x,
            y = current.y,
            cleared,
            score = self.score,
            level = self.level,
            game_over = self.game_over,
            "piece locked"
        );

        cleared
    }
}
