//! Move records and their canonical encoding.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::hashing::HashAlgorithm;
use crate::types::{GameSnapshot, MoveType};

/// One hash-chained ledger entry.
///
/// `hash` covers every other field, `hash_alg` included, in the field order
/// of [`HashedFields`]. `previous_move_hash` is absent only on the first
/// record of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub move_type: MoveType,
    /// Wall-clock unix time in milliseconds
    pub timestamp: u64,
    pub game_state_before: GameSnapshot,
    pub game_state_after: GameSnapshot,
    /// Zero-based position in the ledger
    pub move_index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_move_hash: Option<String>,
    pub hash_alg: HashAlgorithm,
    pub hash: String,
}

/// Borrowed view of every hashed field, in canonical order.
#[derive(Debug, Serialize)]
pub(crate) struct HashedFields<'a> {
    pub move_type: MoveType,
    pub timestamp: u64,
    pub game_state_before: &'a GameSnapshot,
    pub game_state_after: &'a GameSnapshot,
    pub move_index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_move_hash: Option<&'a str>,
    pub hash_alg: HashAlgorithm,
}

impl HashedFields<'_> {
    /// Canonical bytes fed to the hash function.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|err| {
            warn!(move_index = self.move_index, error = %err, "canonical encoding failed");
            Vec::new()
        })
    }
}

impl MoveRecord {
    pub(crate) fn hashed_fields(&self) -> HashedFields<'_> {
        HashedFields {
            move_type: self.move_type,
            timestamp: self.timestamp,
            game_state_before: &self.game_state_before,
            game_state_after: &self.game_state_after,
            move_index: self.move_index,
            previous_move_hash: self.previous_move_hash.as_deref(),
            hash_alg: self.hash_alg,
        }
    }

    /// Canonical encoding of everything except `hash`.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        self.hashed_fields().canonical_bytes()
    }

    /// First record of a chain
    pub fn is_genesis(&self) -> bool {
        self.previous_move_hash.is_none()
    }

    /// Score gained by this move
    pub fn score_delta(&self) -> i64 {
        self.game_state_after.score as i64 - self.game_state_before.score as i64
    }

    /// Lines cleared by this move
    pub fn lines_delta(&self) -> i64 {
        self.game_state_after.lines as i64 - self.game_state_before.lines as i64
    }
}
