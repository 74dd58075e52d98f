//! Deterministic train / validation split.
//!
//! Each record is assigned by a draw seeded from its row id, so the split
//! does not depend on row order and is stable across runs.

use crate::records::FeatureRecord;

/// 64-bit LCG with Knuth's MMIX constants.
#[derive(Debug, Clone)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    const MULT: u64 = 6_364_136_223_846_793_005;
    const INC: u64 = 1_442_695_040_888_963_407;

    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(Self::MULT).wrapping_add(Self::INC),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(Self::MULT).wrapping_add(Self::INC);
        self.state
    }

    /// Uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / ((1_u64 << 53) as f64)
    }
}

fn draw(seed: u64, id: usize) -> f64 {
    let mut rng = Lcg64::new(seed ^ (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    // Skip the first output, it is linear in the seed
    rng.next_u64();
    rng.next_f64()
}

/// Returns `(train, validation)`. Each side keeps the input order.
pub fn split_train_validation(
    records: &[FeatureRecord],
    validation_fraction: f64,
    seed: u64,
) -> (Vec<FeatureRecord>, Vec<FeatureRecord>) {
    records
        .iter()
        .cloned()
        .partition(|r| draw(seed, r.id) >= validation_fraction)
}
