//! Proof Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, tests and
//! benches can use `proof_tetris::{core, ledger, adapter, types}`.

pub mod autoplay;

pub use proof_tetris_adapter as adapter;
pub use proof_tetris_core as core;
pub use proof_tetris_ledger as ledger;
pub use proof_tetris_types as types;
