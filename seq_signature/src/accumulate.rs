//! Summing term vectors over a window.
use super::alphabet;
use super::cache::TermCache;
use super::pack;
use super::term::TermSignature;
use super::SignatureError;

/// Element-wise sum of term vectors. One per window; consumed by `pack`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    values: Vec<i32>,
}

impl Accumulator {
    pub fn new(signature_len: usize) -> Self {
        Self {
            values: vec![0; signature_len],
        }
    }
    pub fn add(&mut self, sig: &TermSignature) {
        assert_eq!(self.values.len(), sig.len());
        self.values
            .iter_mut()
            .zip(sig.values().iter())
            .for_each(|(x, &y)| *x += y as i32);
    }
    pub fn values(&self) -> &[i32] {
        &self.values
    }
    /// Threshold at zero into packed bits.
    pub fn pack(self) -> Vec<u8> {
        pack::pack(&self.values)
    }
}

/// Number of terms of length `word_len` in a window of length `len`.
pub fn term_count(len: usize, word_len: usize) -> usize {
    (len + 1).saturating_sub(word_len)
}

/// Add the vector of every term in `window`, overlapping ones and repeats included.
/// A window shorter than the word length has no terms and sums to zero.
/// Any symbol outside the alphabet rejects the whole window, with its position
/// relative to the window. `accumulate` is usable on its own, so it checks the
/// window even when the caller (`Signer::sign_sequence`) already checked the sequence.
pub fn accumulate(window: &[u8], cache: &TermCache) -> Result<Accumulator, SignatureError> {
    let config = cache.config();
    alphabet::validate(window, 0)?;
    let mut acc = Accumulator::new(config.signature_len);
    if window.len() >= config.word_len {
        for term in window.windows(config.word_len) {
            let sig = cache.get_or_create(term)?;
            acc.add(&sig);
        }
    }
    Ok(acc)
}
