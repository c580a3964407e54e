//! Integrity ledger - hash-chained record of every game move
//!
//! Each accepted move is stored as a [`MoveRecord`] holding the move type, a
//! timestamp, snapshots of the game before and after, its position in the
//! ledger, the hash of the previous record and its own content hash. Anyone
//! holding an exported ledger can re-hash it and check the links without the
//! game engine that produced it.
//!
//! # What verification proves
//!
//! - [`Ledger::verify_one`] / [`Ledger::verify_all`]: the stored ledger was not
//!   edited after the fact (content hashes and chain links hold).
//! - [`Ledger::audit`]: consecutive snapshots line up and each score/line
//!   change is one the scoring rules allow for the declared move.
//!
//! Neither proves the engine was honest: the engine signs its own moves.
//!
//! # Hashing
//!
//! Records are hashed with SHA-256 when the [`DigestProvider`] supplies it and
//! with an FNV-1a 64 checksum otherwise. The family is stored per record in
//! `hash_alg` and is itself covered by the hash.
//!
//! # Example
//!
//! ```
//! use proof_tetris_ledger::Ledger;
//! use proof_tetris_types::{GameSnapshot, MoveType};
//!
//! let mut ledger = Ledger::new();
//! let before = GameSnapshot::default();
//! let after = GameSnapshot { score: 12, ..before };
//! let record = ledger.append(MoveType::HardDrop, before, after, 1_700_000_000_000);
//!
//! assert!(ledger.verify_one(&record));
//! assert!(ledger.verify_all().valid);
//!
//! let json = ledger.export_json().unwrap();
//! let reloaded = Ledger::from_json(&json).unwrap();
//! assert!(reloaded.verify_all().valid);
//! ```

pub mod error;
pub mod hashing;
pub mod ledger;
pub mod record;
pub mod verify;

pub use proof_tetris_types as types;

pub use error::{HashError, LedgerError, Result};
pub use hashing::{
    fnv1a64_hex, sha256_hex, DigestProvider, HashAlgorithm, Sha256Digest, UnavailableDigest,
};
pub use ledger::Ledger;
pub use record::MoveRecord;
pub use verify::{audit_records, check_record, verify_chain, FailureReason, Verification};
