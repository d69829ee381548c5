//! Randomness source for header rotation and retry jitter
//!
//! The scraper never reaches for global random state; it is handed an
//! `Entropy` so tests can pin user agents and delays.

/// Source of uniformly distributed values
pub trait Entropy: Send {
    /// Value in `[0.0, 1.0)`
    fn next_f64(&mut self) -> f64;

    /// Index in `0..len`; `len` must be non-zero
    fn next_index(&mut self, len: usize) -> usize;
}

impl Entropy for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

/// Entropy seeded from the OS, used outside of tests
pub fn system_entropy() -> Box<dyn Entropy> {
    Box::new(fastrand::Rng::new())
}

/// Entropy that replays a fixed value, for deterministic tests and tooling
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy {
    pub fraction: f64,
    pub index: usize,
}

impl FixedEntropy {
    pub const fn new(fraction: f64, index: usize) -> Self {
        Self { fraction, index }
    }
}

impl Entropy for FixedEntropy {
    fn next_f64(&mut self) -> f64 {
        self.fraction
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.index % len
    }
}
