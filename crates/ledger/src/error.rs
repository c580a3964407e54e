//! Error types raised by the move ledger.
//!
//! Appending and verifying never fail with these: hashing problems fall back
//! to a checksum and verification problems are reported as
//! [`Verification`](crate::Verification) values. Only export/import touches I/O.

use thiserror::Error;

/// A digest provider could not produce a hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("hash primitive unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced while exporting or reloading a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
