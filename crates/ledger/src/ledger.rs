//! The append-only move ledger.

use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::error::Result;
use crate::hashing::{fnv1a64_hex, DigestProvider, HashAlgorithm, Sha256Digest};
use crate::record::{HashedFields, MoveRecord};
use crate::types::{GameSnapshot, MoveType};
use crate::verify::{audit_records, check_record, verify_chain, Verification};

/// Append-only, hash-chained sequence of [`MoveRecord`]s.
///
/// Records are only ever pushed at the end; the only way to remove them is
/// [`Ledger::clear`], which starts a new, disjoint chain.
#[derive(Debug)]
pub struct Ledger {
    records: Vec<MoveRecord>,
    digest: Box<dyn DigestProvider>,
}

impl Ledger {
    /// Empty ledger hashing with SHA-256
    pub fn new() -> Self {
        Self::with_digest(Sha256Digest)
    }

    /// Empty ledger with a custom SHA-256 provider
    pub fn with_digest(digest: impl DigestProvider + 'static) -> Self {
        Self {
            records: Vec::new(),
            digest: Box::new(digest),
        }
    }

    /// Wrap already-recorded entries (e.g. a reloaded export). Nothing is verified here.
    pub fn from_records(records: Vec<MoveRecord>) -> Self {
        Self {
            records,
            digest: Box::new(Sha256Digest),
        }
    }

    /// Reload a ledger produced by [`Ledger::export_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MoveRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Reload a ledger from any reader (file, socket, ...).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<MoveRecord> = serde_json::from_reader(reader)?;
        Ok(Self::from_records(records))
    }

    /// Hash, link and append a record for one move; returns a copy of it.
    pub fn append(
        &mut self,
        move_type: MoveType,
        before: GameSnapshot,
        after: GameSnapshot,
        timestamp: u64,
    ) -> MoveRecord {
        let move_index = self.records.len() as u64;
        let previous_move_hash = self.last_hash().map(str::to_string);

        let mut fields = HashedFields {
            move_type,
            timestamp,
            game_state_before: &before,
            game_state_after: &after,
            move_index,
            previous_move_hash: previous_move_hash.as_deref(),
            hash_alg: HashAlgorithm::Sha256,
        };

        let hash = match self.digest.sha256_hex(&fields.canonical_bytes()) {
            Ok(hash) => hash,
            Err(err) => {
                warn!(move_index, error = %err, "falling back to fnv1a64 checksum");
                fields.hash_alg = HashAlgorithm::Fnv1a64;
                fnv1a64_hex(&fields.canonical_bytes())
            }
        };
        let hash_alg = fields.hash_alg;

        let record = MoveRecord {
            move_type,
            timestamp,
            game_state_before: before,
            game_state_after: after,
            move_index,
            previous_move_hash,
            hash_alg,
            hash,
        };

        debug!(
            move_index,
            move_type = %move_type,
            hash_alg = %hash_alg,
            hash = %record.hash,
            "appended move record"
        );

        self.records.push(record.clone());
        record
    }

    /// Whether `record`'s stored hash matches its contents.
    pub fn verify_one(&self, record: &MoveRecord) -> bool {
        match check_record(record, self.digest.as_ref()) {
            Ok(()) => true,
            Err(reason) => {
                warn!(move_index = record.move_index, %reason, "record failed verification");
                false
            }
        }
    }

    /// Re-hash every record and check the chain links.
    pub fn verify_all(&self) -> Verification {
        let result = verify_chain(&self.records, self.digest.as_ref());
        if !result.valid {
            warn!(%result, "ledger failed verification");
        }
        result
    }

    /// Check snapshot continuity and per-move scoring rules.
    pub fn audit(&self) -> Verification {
        let result = audit_records(&self.records);
        if !result.valid {
            warn!(%result, "ledger failed audit");
        }
        result
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn last_hash(&self) -> Option<&str> {
        self.records.last().map(|r| r.hash.as_str())
    }

    /// Pretty-printed JSON array of all records.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Write the JSON export to `writer`.
    pub fn export_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writer.flush()?;
        Ok(())
    }

    /// Drop every record. Irreversible; used when a session restarts.
    pub fn clear(&mut self) {
        debug!(dropped = self.records.len(), "ledger cleared");
        self.records.clear();
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
