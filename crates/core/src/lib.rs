//! Core game logic - deterministic rules plus the move ledger hookup
//!
//! This crate contains the board, the pieces, the scoring rules and the
//! game engine that records every move into a [`Ledger`]. It has no
//! dependencies on rendering, input or async runtimes: time only enters
//! through the `elapsed_ms` each caller reports and the injected [`Clock`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with placement checks and line clearing
//! - [`pieces`]: the seven spawn matrices and clockwise rotation
//! - [`rng`]: seeded uniform piece selection and scripted sequences
//! - [`scoring`]: line bonuses, level progression, gravity speed
//! - [`game_state`]: one game's board, pieces, counters and gravity
//! - [`engine`]: rate limiting, move dispatch and ledger recording
//! - [`clock`]: timestamp sources for ledger records
//!
//! # Game Rules
//!
//! - **Uniform spawns**: each new piece is any of the seven kinds with equal chance
//! - **Plain rotation**: 90° clockwise, refused if blocked (no wall kicks)
//! - **Instant lock**: a piece locks as soon as gravity cannot move it down
//! - **Scoring**: 100/300/500/800 x level for 1-4 lines, +1 per hard-drop row
//! - **Levels**: one per 10 lines, starting at 1
//!
//! # Example
//!
//! ```
//! use proof_tetris_core::{EngineConfig, GameEngine, ManualClock};
//! use proof_tetris_core::ledger::Ledger;
//! use proof_tetris_core::types::MoveType;
//!
//! let mut engine = GameEngine::new(EngineConfig::seeded(7), Ledger::new(), ManualClock::new(0));
//!
//! engine.attempt_move(MoveType::MoveRight, 100);
//! let outcome = engine.attempt_move(MoveType::HardDrop, 100);
//!
//! assert!(outcome.accepted);
//! assert!(engine.score() > 0); // Hard drop awards points
//! assert!(engine.ledger().verify_all().valid);
//! ```
//!
//! # Timing
//!
//! - **Tick Rate**: drivers send `auto_drop` about every 16ms
//! - **Gravity**: 1000ms per row at level 1, 50ms faster per level, floor 50ms
//! - **Move delay**: player moves closer than 100ms apart are rejected

pub mod board;
pub mod clock;
pub mod engine;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use proof_tetris_ledger as ledger;
pub use proof_tetris_types as types;

pub use board::Board;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{EngineConfig, GameEngine, MoveOutcome};
pub use game_state::GameSession;
pub use pieces::{rotate, spawn_shape, spawn_x, Piece, PieceCells};
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{gravity_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
