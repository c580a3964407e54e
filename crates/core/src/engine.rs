//! Game engine - the single entry point for driving a game
//!
//! [`GameEngine::attempt_move`] applies one move to the session, enforces
//! the player-move rate limit, and appends a before/after record to the
//! ledger the engine was constructed with.
//!
//! Time is whatever the caller says it is: every call reports the
//! milliseconds elapsed since the previous one, and the rate limit is
//! measured on that session clock. Only record timestamps come from the
//! injected [`Clock`].

use tracing::{debug, info};

use crate::board::Board;
use crate::clock::{Clock, SystemClock};
use crate::game_state::GameSession;
use crate::ledger::{Ledger, MoveRecord};
use crate::pieces::Piece;
use crate::rng::PieceSource;
use crate::types::{GameSnapshot, MoveType, MOVE_DELAY_MS};

/// Engine construction options
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum session time between accepted player moves
    pub move_delay_ms: u32,
    pub piece_source: PieceSource,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_delay_ms: MOVE_DELAY_MS,
            piece_source: PieceSource::default(),
        }
    }
}

impl EngineConfig {
    pub fn seeded(seed: u32) -> Self {
        Self {
            piece_source: PieceSource::random(seed),
            ..Self::default()
        }
    }
}

/// Result of one [`GameEngine::attempt_move`] call
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub accepted: bool,
    /// The appended ledger record, if one was written
    pub record: Option<MoveRecord>,
}

impl MoveOutcome {
    fn rejected() -> Self {
        Self {
            accepted: false,
            record: None,
        }
    }
}

/// A game session bound to its ledger
#[derive(Debug)]
pub struct GameEngine {
    session: GameSession,
    ledger: Ledger,
    clock: Box<dyn Clock>,
    move_delay_ms: u32,
    /// Sum of all `elapsed_ms` reported since start/restart
    session_time_ms: u64,
    /// Session time of the last accepted player move
    last_move_ms: Option<u64>,
}

impl GameEngine {
    pub fn new(config: EngineConfig, ledger: Ledger, clock: impl Clock + 'static) -> Self {
        info!(
            seed = ?config.piece_source.seed(),
            move_delay_ms = config.move_delay_ms,
            "game session started"
        );
        Self {
            session: GameSession::new(config.piece_source),
            ledger,
            clock: Box::new(clock),
            move_delay_ms: config.move_delay_ms,
            session_time_ms: 0,
            last_move_ms: None,
        }
    }

    /// Apply `move_type` after `elapsed_ms` of session time.
    ///
    /// - Game over: rejected, nothing recorded.
    /// - Player moves closer than the move delay to the last accepted one:
    ///   rejected, nothing recorded.
    /// - Otherwise the move is applied. Accepted moves are recorded;
    ///   `auto_drop` is recorded whether or not gravity fired.
    pub fn attempt_move(&mut self, move_type: MoveType, elapsed_ms: u32) -> MoveOutcome {
        self.session_time_ms = self.session_time_ms.saturating_add(elapsed_ms as u64);

        if self.session.game_over() {
            return MoveOutcome::rejected();
        }

        let now = self.session_time_ms;
        if move_type.is_player_move() {
            if let Some(last) = self.last_move_ms {
                if now.saturating_sub(last) < self.move_delay_ms as u64 {
                    debug!(move_type = %move_type, "move rate limited");
                    return MoveOutcome::rejected();
                }
            }
        }

        let before = self.session.snapshot();

        let accepted = match move_type {
            MoveType::MoveLeft => self.session.try_move(-1, 0),
            MoveType::MoveRight => self.session.try_move(1, 0),
            MoveType::Rotate => self.session.try_rotate(),
            MoveType::SoftDrop => self.session.try_move(0, 1),
            MoveType::HardDrop => {
                self.session.hard_drop();
                true
            }
            MoveType::AutoDrop => self.session.gravity_tick(elapsed_ms),
        };

        if accepted && move_type.is_player_move() {
            self.last_move_ms = Some(now);
        }

        let after = self.session.snapshot();

        if after.game_over {
            info!(
                score = after.score,
                level = after.level,
                lines = after.lines,
                moves = self.ledger.len() + 1,
                "game over"
            );
        }

        if !accepted && move_type != MoveType::AutoDrop {
            return MoveOutcome::rejected();
        }

        let record = self
            .ledger
            .append(move_type, before, after, self.clock.now_ms());

        MoveOutcome {
            accepted,
            record: Some(record),
        }
    }

    /// Start a new game and a new, empty ledger chain
    pub fn restart(&mut self) {
        info!(
            score = self.session.score(),
            dropped_records = self.ledger.len(),
            "session restarted"
        );
        self.session.reset();
        self.ledger.clear();
        self.session_time_ms = 0;
        self.last_move_ms = None;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn lines(&self) -> u32 {
        self.session.lines()
    }

    pub fn game_over(&self) -> bool {
        self.session.game_over()
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.session.gravity_interval_ms()
    }

    pub fn board(&self) -> &Board {
        self.session.board()
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.session.current_piece()
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.session.next_piece()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Session clock: total elapsed milliseconds reported so far
    pub fn session_time_ms(&self) -> u64 {
        self.session_time_ms
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Ledger::new(), SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{PieceKind, BOARD_WIDTH};

    fn engine_of(kinds: &[PieceKind]) -> GameEngine {
        let config = EngineConfig {
            piece_source: PieceSource::sequence(kinds.to_vec()),
            ..EngineConfig::default()
        };
        GameEngine::new(config, Ledger::new(), ManualClock::new(1_700_000_000_000))
    }

    /// Fill the bottom row except the four columns a horizontal I spawns over
    fn prepare_single_clear(engine: &mut GameEngine) {
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..7).contains(&x) {
                engine.session.board_mut().set(x, 19, Some(PieceKind::J));
            }
        }
    }

    #[test]
    fn test_i_piece_left_rotate_hard_drop() {
        let mut engine = engine_of(&[PieceKind::I, PieceKind::O]);

        let left = engine.attempt_move(MoveType::MoveLeft, 100);
        assert!(left.accepted);
        assert_eq!(engine.current_piece().unwrap().x, 2);

        let rotate = engine.attempt_move(MoveType::Rotate, 100);
        assert!(rotate.accepted);
        let piece = engine.current_piece().unwrap();
        assert_eq!((piece.shape.rows(), piece.shape.cols()), (4, 1));

        let drop = engine.attempt_move(MoveType::HardDrop, 100);
        assert!(drop.accepted);
        assert_eq!(engine.score(), 16);
        for y in 16..20 {
            assert!(engine.board().is_occupied(2, y));
        }

        let records = engine.ledger().records();
        assert_eq!(records.len(), 3);
        let kinds: Vec<_> = records.iter().map(|r| r.move_type).collect();
        assert_eq!(
            kinds,
            vec![MoveType::MoveLeft, MoveType::Rotate, MoveType::HardDrop]
        );
        assert_eq!(records[2].game_state_after.score, 16);
        assert!(engine.ledger().verify_all().valid);
        assert!(engine.ledger().audit().valid);
    }

    #[test]
    fn test_single_line_clear() {
        let mut engine = engine_of(&[PieceKind::I, PieceKind::T]);
        prepare_single_clear(&mut engine);

        let outcome = engine.attempt_move(MoveType::HardDrop, 0);
        let record = outcome.record.unwrap();
        assert_eq!(record.lines_delta(), 1);
        assert_eq!(engine.lines(), 1);
        assert_eq!(engine.score(), 19 + 100);
        assert_eq!(engine.board().filled_count(), 0);
    }

    #[test]
    fn test_ten_single_clears_reach_level_two() {
        let mut engine = engine_of(&[PieceKind::I]);
        for _ in 0..10 {
            prepare_single_clear(&mut engine);
            assert!(engine.attempt_move(MoveType::HardDrop, 100).accepted);
        }
        assert_eq!(engine.lines(), 10);
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.gravity_interval_ms(), 950);
        // All ten clears were scored at level 1.
        assert_eq!(engine.score(), 10 * (19 + 100));
    }

    #[test]
    fn test_filling_the_last_gap_scores_at_current_level() {
        let mut engine = engine_of(&[PieceKind::I]);
        for _ in 0..10 {
            prepare_single_clear(&mut engine);
            assert!(engine.attempt_move(MoveType::HardDrop, 100).accepted);
        }
        assert_eq!(engine.level(), 2);
        let score_before = engine.score();

        // Bottom row full except column 2; a vertical I drops into the gap.
        for x in 0..BOARD_WIDTH as i8 {
            if x != 2 {
                engine.session.board_mut().set(x, 19, Some(PieceKind::J));
            }
        }
        assert!(engine.attempt_move(MoveType::MoveLeft, 100).accepted);
        assert!(engine.attempt_move(MoveType::Rotate, 100).accepted);
        let drop = engine.attempt_move(MoveType::HardDrop, 100);
        assert!(drop.accepted);

        assert_eq!(engine.lines(), 11);
        assert_eq!(engine.score(), score_before + 16 + 100 * 2);
        assert_eq!(engine.board().filled_count(), 3);
        for y in 17..20 {
            assert!(engine.board().is_occupied(2, y));
        }
        assert!(engine.ledger().verify_all().valid);
    }

    #[test]
    fn test_spawn_collision_is_terminal_until_restart() {
        let mut engine = engine_of(&[PieceKind::O]);
        engine.session.board_mut().set(4, 2, Some(PieceKind::Z));
        engine.session.board_mut().set(5, 2, Some(PieceKind::Z));

        let outcome = engine.attempt_move(MoveType::HardDrop, 0);
        assert!(outcome.accepted);
        assert!(outcome.record.unwrap().game_state_after.game_over);
        assert!(engine.game_over());

        let recorded = engine.ledger().len();
        for move_type in MoveType::ALL {
            let outcome = engine.attempt_move(move_type, 1_000);
            assert!(!outcome.accepted);
            assert!(outcome.record.is_none());
        }
        assert_eq!(engine.ledger().len(), recorded);

        engine.restart();
        assert!(!engine.game_over());
        assert!(engine.ledger().is_empty());
        assert_eq!(engine.board().filled_count(), 0);
        assert!(engine.attempt_move(MoveType::MoveLeft, 0).accepted);
    }

    #[test]
    fn test_player_moves_are_rate_limited() {
        let mut engine = engine_of(&[PieceKind::T]);
        assert!(engine.attempt_move(MoveType::MoveLeft, 0).accepted);

        let too_soon = engine.attempt_move(MoveType::MoveRight, 50);
        assert!(!too_soon.accepted);
        assert!(too_soon.record.is_none());

        // 50 + 50 = 100ms since the last accepted move.
        assert!(engine.attempt_move(MoveType::MoveRight, 50).accepted);
        assert_eq!(engine.ledger().len(), 2);
    }

    #[test]
    fn test_rejected_move_does_not_reset_rate_limit() {
        let mut engine = engine_of(&[PieceKind::O]);
        for _ in 0..4 {
            assert!(engine.attempt_move(MoveType::MoveLeft, 100).accepted);
        }
        // Against the wall: rejected without a record.
        let blocked = engine.attempt_move(MoveType::MoveLeft, 100);
        assert!(!blocked.accepted);
        assert!(blocked.record.is_none());
        // Only the move at 400ms counts; the blocked one at 500ms does not.
        assert!(engine.attempt_move(MoveType::MoveRight, 0).accepted);
    }

    #[test]
    fn test_auto_drop_is_exempt_and_always_recorded() {
        let mut engine = engine_of(&[PieceKind::T]);
        assert!(engine.attempt_move(MoveType::MoveLeft, 0).accepted);

        let quiet = engine.attempt_move(MoveType::AutoDrop, 16);
        assert!(!quiet.accepted);
        assert!(quiet.record.is_some());
        assert_eq!(engine.current_piece().unwrap().y, 0);

        let fired = engine.attempt_move(MoveType::AutoDrop, 984);
        assert!(fired.accepted);
        assert_eq!(engine.current_piece().unwrap().y, 1);
        assert_eq!(engine.ledger().len(), 3);
        assert!(engine.ledger().verify_all().valid);
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut engine = engine_of(&[PieceKind::O, PieceKind::I]);
        let mut accepted = 0;
        for _ in 0..25 {
            if engine.attempt_move(MoveType::SoftDrop, 100).accepted {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 18);
        assert_eq!(engine.board().filled_count(), 0);
        assert_eq!(engine.current_piece().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_occupied_cells_are_conserved() {
        let config = EngineConfig::seeded(2024);
        let mut engine = GameEngine::new(config, Ledger::new(), ManualClock::new(0));
        let moves = [
            MoveType::MoveLeft,
            MoveType::Rotate,
            MoveType::MoveRight,
            MoveType::MoveRight,
            MoveType::HardDrop,
        ];

        let mut locks = 0;
        let mut step = 0;
        while !engine.game_over() && locks < 200 {
            let move_type = moves[step % moves.len()];
            let shift = (step / moves.len()) % 5;
            step += 1;
            // Vary the landing column so rows actually fill.
            let move_type = if move_type == MoveType::MoveRight && shift < 2 {
                MoveType::MoveLeft
            } else {
                move_type
            };
            if engine.attempt_move(move_type, 100).accepted && move_type == MoveType::HardDrop {
                locks += 1;
                let snap = engine.snapshot();
                assert_eq!(
                    snap.filled_cells() + 10 * snap.lines as usize,
                    4 * locks,
                    "after {} locks",
                    locks
                );
            }
        }
        assert!(locks > 0);
        assert!(engine.ledger().verify_all().valid);
        assert!(engine.ledger().audit().valid);
    }

    #[test]
    fn test_records_use_injected_clock() {
        let clock = ManualClock::new(5_000);
        let config = EngineConfig {
            piece_source: PieceSource::sequence(vec![PieceKind::T]),
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::new(config, Ledger::new(), clock.clone());

        let first = engine.attempt_move(MoveType::MoveLeft, 0).record.unwrap();
        clock.advance(250);
        let second = engine.attempt_move(MoveType::MoveRight, 100).record.unwrap();
        assert_eq!(first.timestamp, 5_000);
        assert_eq!(second.timestamp, 5_250);
        assert_eq!(engine.session_time_ms(), 100);
    }
}
