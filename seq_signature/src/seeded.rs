//! Reproducible position streams seeded by term content.
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Random positions derived from the bytes of a term only.
/// Two generators seeded with the same bytes yield the same positions,
/// on any thread and in any run.
pub struct SeededPositions {
    rng: Xoshiro256StarStar,
}

impl SeededPositions {
    pub fn new(term: &[u8]) -> Self {
        let rng = Xoshiro256StarStar::seed_from_u64(seed_of(term));
        Self { rng }
    }
    /// A position in `[0, bound)`. `bound` should be positive.
    #[inline]
    pub fn next_position(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// The first eight bytes of the MD5 digest, little endian.
pub fn seed_of(term: &[u8]) -> u64 {
    let digest = md5::compute(term);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest.0[..8]);
    u64::from_le_bytes(seed)
}
