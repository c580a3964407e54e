//! Ledger verification.
//!
//! [`verify_chain`] re-hashes records and checks the hash links; it says
//! nothing about whether the recorded game obeyed the rules. [`audit_records`]
//! is the complementary rule check: it never looks at hashes, only at how
//! consecutive snapshots relate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hashing::{fnv1a64_hex, DigestProvider, HashAlgorithm};
use crate::record::MoveRecord;
use crate::types::{
    GameSnapshot, MoveType, BOARD_HEIGHT, HARD_DROP_CELL_SCORE, LINES_PER_LEVEL, LINE_SCORES,
    START_LEVEL,
};

/// Why a ledger failed verification or audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Stored hash differs from the recomputed one
    HashMismatch,
    /// Record was hashed with a primitive this verifier does not have
    HashUnavailable,
    /// `previous_move_hash` does not match the predecessor's hash
    ChainBroken,
    /// `move_index` does not match the record's position
    IndexMismatch,
    /// `game_state_before` differs from the predecessor's `game_state_after`
    StateDiscontinuity,
    /// Snapshot pair cannot result from the declared move
    RuleViolation,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::HashMismatch => "hash mismatch",
            FailureReason::HashUnavailable => "hash unavailable",
            FailureReason::ChainBroken => "chain broken",
            FailureReason::IndexMismatch => "index mismatch",
            FailureReason::StateDiscontinuity => "state discontinuity",
            FailureReason::RuleViolation => "rule violation",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a whole-ledger check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

impl Verification {
    pub fn ok() -> Self {
        Self {
            valid: true,
            invalid_index: None,
            reason: None,
        }
    }

    pub fn invalid(index: usize, reason: FailureReason) -> Self {
        Self {
            valid: false,
            invalid_index: Some(index),
            reason: Some(reason),
        }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.valid, self.invalid_index, self.reason) {
            (true, _, _) => f.write_str("valid"),
            (false, Some(i), Some(reason)) => write!(f, "invalid at record {i}: {reason}"),
            (false, Some(i), None) => write!(f, "invalid at record {i}"),
            (false, None, _) => f.write_str("invalid"),
        }
    }
}

/// Recompute the hash of `record` with the family it declares.
pub(crate) fn recompute_hash(
    record: &MoveRecord,
    digest: &dyn DigestProvider,
) -> Result<String, FailureReason> {
    let bytes = record.canonical_bytes();
    match record.hash_alg {
        HashAlgorithm::Sha256 => digest
            .sha256_hex(&bytes)
            .map_err(|_| FailureReason::HashUnavailable),
        HashAlgorithm::Fnv1a64 => Ok(fnv1a64_hex(&bytes)),
    }
}

/// Check a single record's content hash.
pub fn check_record(record: &MoveRecord, digest: &dyn DigestProvider) -> Result<(), FailureReason> {
    let recomputed = recompute_hash(record, digest)?;
    if recomputed == record.hash {
        Ok(())
    } else {
        Err(FailureReason::HashMismatch)
    }
}

/// Re-hash every record and check the hash links, stopping at the first failure.
///
/// For each record, in order: content hash, then (after the first) the link
/// to the predecessor, then the sequence index.
pub fn verify_chain(records: &[MoveRecord], digest: &dyn DigestProvider) -> Verification {
    for (i, record) in records.iter().enumerate() {
        if let Err(reason) = check_record(record, digest) {
            return Verification::invalid(i, reason);
        }

        if i > 0 {
            let previous_hash = records[i - 1].hash.as_str();
            if record.previous_move_hash.as_deref() != Some(previous_hash) {
                return Verification::invalid(i, FailureReason::ChainBroken);
            }
        }

        if record.move_index != i as u64 {
            return Verification::invalid(i, FailureReason::IndexMismatch);
        }
    }

    Verification::ok()
}

/// Check that snapshots are continuous and each transition is one the rules allow.
pub fn audit_records(records: &[MoveRecord]) -> Verification {
    for (i, record) in records.iter().enumerate() {
        if i > 0 && record.game_state_before != records[i - 1].game_state_after {
            return Verification::invalid(i, FailureReason::StateDiscontinuity);
        }
        if !transition_is_legal(record) {
            return Verification::invalid(i, FailureReason::RuleViolation);
        }
    }

    Verification::ok()
}

fn level_matches_lines(s: &GameSnapshot) -> bool {
    s.level == s.lines / LINES_PER_LEVEL + START_LEVEL
}

fn transition_is_legal(record: &MoveRecord) -> bool {
    let before = &record.game_state_before;
    let after = &record.game_state_after;

    // Moves are never recorded once the session is over.
    if before.game_over {
        return false;
    }
    if !level_matches_lines(before) || !level_matches_lines(after) {
        return false;
    }
    if after.score < before.score || after.lines < before.lines {
        return false;
    }

    let lines = (after.lines - before.lines) as usize;
    if lines >= LINE_SCORES.len() {
        return false;
    }
    let Some(line_bonus) = LINE_SCORES[lines].checked_mul(before.level) else {
        return false;
    };
    let gained = after.score - before.score;

    match record.move_type {
        MoveType::MoveLeft | MoveType::MoveRight | MoveType::Rotate | MoveType::SoftDrop => {
            lines == 0 && gained == 0 && after.board == before.board
        }
        MoveType::AutoDrop => gained == line_bonus,
        MoveType::HardDrop => {
            let max_drop = BOARD_HEIGHT as u32 * HARD_DROP_CELL_SCORE;
            gained
                .checked_sub(line_bonus)
                .is_some_and(|drop_bonus| drop_bonus <= max_drop)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_index_and_reason() {
        let v = Verification::invalid(3, FailureReason::ChainBroken);
        assert_eq!(v.to_string(), "invalid at record 3: chain broken");
        assert_eq!(Verification::ok().to_string(), "valid");
    }

    #[test]
    fn valid_result_serializes_without_optional_fields() {
        let json = serde_json::to_string(&Verification::ok()).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);

        let json = serde_json::to_string(&Verification::invalid(1, FailureReason::HashMismatch))
            .unwrap();
        assert_eq!(
            json,
            r#"{"valid":false,"invalid_index":1,"reason":"hash_mismatch"}"#
        );
    }

    fn hard_drop(before: GameSnapshot, after: GameSnapshot) -> MoveRecord {
        MoveRecord {
            move_type: MoveType::HardDrop,
            timestamp: 0,
            game_state_before: before,
            game_state_after: after,
            move_index: 0,
            previous_move_hash: None,
            hash_alg: HashAlgorithm::Fnv1a64,
            hash: String::new(),
        }
    }

    #[test]
    fn huge_level_bonus_is_a_rule_violation() {
        let before = GameSnapshot {
            lines: 3_999_999_990,
            level: 400_000_000,
            ..GameSnapshot::default()
        };
        let after = GameSnapshot {
            lines: 3_999_999_994,
            ..before
        };
        let result = audit_records(&[hard_drop(before, after)]);
        assert_eq!(result, Verification::invalid(0, FailureReason::RuleViolation));
    }

    #[test]
    fn hard_drop_bonus_is_bounded() {
        let before = GameSnapshot::default();
        let legal = GameSnapshot {
            score: 18,
            ..before
        };
        assert!(audit_records(&[hard_drop(before, legal)]).valid);

        let inflated = GameSnapshot {
            score: 5_000,
            ..before
        };
        assert!(!audit_records(&[hard_drop(before, inflated)]).valid);
    }

    #[test]
    fn empty_ledger_is_vacuously_valid() {
        assert!(verify_chain(&[], &crate::Sha256Digest).valid);
        assert!(audit_records(&[]).valid);
    }
}
