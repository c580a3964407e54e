//! Content hashing for move records.
//!
//! Two hash families exist. `sha256` is preferred and goes through a
//! [`DigestProvider`] so the primitive can be swapped or reported missing;
//! `fnv1a64` is a plain checksum that is always computable and serves as the
//! deterministic fallback. Every record stores the family it was hashed with.

use std::fmt;
use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::HashError;

/// Hash family recorded alongside each record's hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Hex-encoded SHA-256
    Sha256,
    /// Hex-encoded 64-bit FNV-1a checksum (fallback)
    Fnv1a64,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Fnv1a64 => "fnv1a64",
        }
    }

    pub fn is_cryptographic(&self) -> bool {
        matches!(self, HashAlgorithm::Sha256)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the cryptographic (SHA-256) digest.
pub trait DigestProvider: Send + Sync + fmt::Debug {
    /// Hex-encoded SHA-256 of `bytes`.
    fn sha256_hex(&self, bytes: &[u8]) -> Result<String, HashError>;
}

/// Default provider backed by the `sha2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestProvider for Sha256Digest {
    fn sha256_hex(&self, bytes: &[u8]) -> Result<String, HashError> {
        Ok(sha256_hex(bytes))
    }
}

/// Provider with no SHA-256 available; every record falls back to `fnv1a64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDigest;

impl DigestProvider for UnavailableDigest {
    fn sha256_hex(&self, _bytes: &[u8]) -> Result<String, HashError> {
        Err(HashError::Unavailable("sha256 digest not provided".to_string()))
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Stable 64-bit FNV-1a hasher.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions, so
/// it cannot back a persisted checksum.
#[derive(Debug, Clone)]
pub struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Hex-encoded FNV-1a 64 checksum (always 16 hex digits).
pub fn fnv1a64_hex(bytes: &[u8]) -> String {
    let mut h = Fnv1aHasher::new();
    h.write(bytes);
    hex::encode(h.finish().to_be_bytes())
}
