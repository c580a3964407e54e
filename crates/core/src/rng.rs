//! RNG module - piece selection
//!
//! Every spawn picks one of the seven kinds independently and uniformly at
//! random. The generator is a seeded LCG so that a session can be replayed
//! exactly from its seed. A scripted [`PieceSource::Sequence`] is available
//! for replays and tests that need a known piece order.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state, seed }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits, which are the well-mixed ones in an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Where new pieces come from.
#[derive(Debug, Clone)]
pub enum PieceSource {
    /// Uniform random choice among the seven kinds
    Random(SimpleRng),
    /// Cycle through a fixed list of kinds
    Sequence { kinds: Vec<PieceKind>, next: usize },
}

impl PieceSource {
    pub fn random(seed: u32) -> Self {
        PieceSource::Random(SimpleRng::new(seed))
    }

    /// Scripted order; an empty list falls back to repeating `I`.
    pub fn sequence(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        PieceSource::Sequence { kinds, next: 0 }
    }

    /// Seed of a random source; `None` for a scripted one
    pub fn seed(&self) -> Option<u32> {
        match self {
            PieceSource::Random(rng) => Some(rng.seed()),
            PieceSource::Sequence { .. } => None,
        }
    }

    /// Draw the kind of the next piece to spawn
    pub fn draw(&mut self) -> PieceKind {
        match self {
            PieceSource::Random(rng) => {
                let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[idx]
            }
            PieceSource::Sequence { kinds, next } => {
                let kind = kinds[*next % kinds.len()];
                *next = (*next + 1) % kinds.len();
                kind
            }
        }
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::random(1)
    }
}
