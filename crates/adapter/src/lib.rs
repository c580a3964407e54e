//! Adapter - async session runtime around the game engine
//!
//! The core engine is synchronous and single-threaded. This crate puts it in
//! a tokio task so that several producers (player input, the gravity ticker,
//! an auditor asking for verification) can share one session without locks.
//!
//! # Pieces
//!
//! - [`runtime`]: the session task and its cloneable [`SessionHandle`]
//! - [`ticker`]: periodic `auto_drop` commands
//! - [`config`]: [`SessionConfig`] read from the environment
//!
//! # Environment Variables
//!
//! - `PROOF_TETRIS_SEED`: piece RNG seed (default: derived from the clock)
//! - `PROOF_TETRIS_MOVE_DELAY_MS`: minimum spacing of player moves (default: 100)
//! - `PROOF_TETRIS_TICK_MS`: gravity ticker period (default: 16)
//! - `PROOF_TETRIS_MAX_PENDING`: command channel depth (default: 64)
//! - `PROOF_TETRIS_EXPORT_PATH`: where the demo writes its ledger export
//!
//! # Example
//!
//! ```
//! use proof_tetris_adapter::{start_session, SessionConfig};
//! use proof_tetris_adapter::types::MoveType;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = SessionConfig { seed: 9, ..SessionConfig::default() };
//! let (session, _task) = start_session(&config);
//!
//! session.attempt_move(MoveType::HardDrop, 0).await.unwrap();
//! assert!(session.verify_all().await.unwrap().valid);
//! # });
//! ```

pub mod config;
pub mod runtime;
pub mod ticker;

pub use proof_tetris_core as core;
pub use proof_tetris_ledger as ledger;
pub use proof_tetris_types as types;

pub use config::SessionConfig;
pub use runtime::{spawn_session, start_session, SessionCommand, SessionError, SessionHandle};
pub use ticker::spawn_gravity_ticker;
