//! Sparse ternary vectors of terms.
use super::alphabet;
use super::seeded::SeededPositions;
use super::{Config, SignatureError};

/// The random index vector of a term. Each entry is -1, 0, or +1,
/// and there are as many +1 as -1.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TermSignature {
    values: Vec<i8>,
}

impl std::fmt::Debug for TermSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for &v in self.values.iter() {
            let c = match v {
                1 => '+',
                -1 => '-',
                _ => '.',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl TermSignature {
    /// Build the vector of `term`. The result depends only on the bytes of
    /// `term` and on the signature length and density of `config`.
    /// The config must be validated beforehand; otherwise this may never return.
    pub fn build(term: &[u8], config: &Config) -> Result<Self, SignatureError> {
        if term.len() != config.word_len {
            return Err(SignatureError::TermLength {
                expected: config.word_len,
                actual: term.len(),
            });
        }
        alphabet::validate(term, 0)?;
        let len = config.signature_len;
        let half = config.half_non_zero();
        let mut values = vec![0i8; len];
        let mut positions = SeededPositions::new(term);
        for &sign in &[1i8, -1] {
            let mut placed = 0;
            while placed < half {
                let pos = positions.next_position(len);
                if values[pos] == 0 {
                    values[pos] = sign;
                    placed += 1;
                }
            }
        }
        Ok(Self { values })
    }
    pub fn values(&self) -> &[i8] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn positives(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }
    pub fn negatives(&self) -> usize {
        self.values.iter().filter(|&&v| v == -1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AMINO_ACIDS;
    use crate::DEFAULT_CONFIG;
    #[test]
    fn density() {
        let config = DEFAULT_CONFIG;
        for &a in AMINO_ACIDS.iter() {
            for &b in AMINO_ACIDS.iter() {
                for &c in AMINO_ACIDS.iter() {
                    let sig = TermSignature::build(&[a, b, c], &config).unwrap();
                    assert_eq!(sig.len(), 64);
                    assert_eq!(sig.positives(), 6);
                    assert_eq!(sig.negatives(), 6);
                    assert!(sig.values().iter().all(|v| (-1..=1).contains(v)));
                }
            }
        }
    }
    #[test]
    fn pure() {
        let config = DEFAULT_CONFIG;
        let x = TermSignature::build(b"MIL", &config).unwrap();
        let y = TermSignature::build(b"MIL", &config).unwrap();
        assert_eq!(x, y);
        let z = TermSignature::build(b"LIM", &config).unwrap();
        assert_ne!(x, z);
    }
    #[test]
    fn odd_non_zero() {
        // 8 * 50 / 100 = 4, 8 * 40 / 100 = 3 -> one of the three is dropped.
        let config = Config::new(3, 6, 8, 40);
        let sig = TermSignature::build(b"CST", &config).unwrap();
        assert_eq!((sig.positives(), sig.negatives()), (1, 1));
        let config = Config::new(3, 6, 8, 50);
        let sig = TermSignature::build(b"CST", &config).unwrap();
        assert_eq!((sig.positives(), sig.negatives()), (2, 2));
    }
    #[test]
    fn full_density() {
        let config = Config::new(2, 6, 16, 100);
        let sig = TermSignature::build(b"WW", &config).unwrap();
        assert_eq!((sig.positives(), sig.negatives()), (8, 8));
        let config = Config::new(2, 6, 16, 0);
        let sig = TermSignature::build(b"WW", &config).unwrap();
        assert!(sig.values().iter().all(|&v| v == 0));
    }
    #[test]
    fn invalid_term() {
        let config = DEFAULT_CONFIG;
        assert_eq!(
            TermSignature::build(b"CXT", &config),
            Err(SignatureError::InvalidSymbol {
                symbol: b'X',
                position: 1
            })
        );
        assert_eq!(
            TermSignature::build(b"CSTP", &config),
            Err(SignatureError::TermLength {
                expected: 3,
                actual: 4
            })
        );
    }
}
