//! Error types.
use thiserror::Error;

/// Rejected parameter sets. Raised before any sequence is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("signature length must be a positive multiple of 8, got {0}")]
    SignatureLen(usize),
    #[error("word length must be positive")]
    ZeroWordLen,
    #[error("density {0}% leaves more non-zero entries than the signature holds")]
    Density(usize),
    #[error("partition size must be even and at least 2, got {0}")]
    PartitionSize(usize),
    #[error("term cache capacity must be positive")]
    ZeroCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A byte outside the amino acid alphabet. `position` is relative to the sequence.
    #[error("invalid symbol {symbol:#04x} at position {position}")]
    InvalidSymbol { symbol: u8, position: usize },
    #[error("term length {actual} differs from the word length {expected}")]
    TermLength { expected: usize, actual: usize },
    #[error("term cache is full ({capacity} terms)")]
    CacheFull { capacity: usize },
    #[error("record index does not fit in 32 bits")]
    IndexOverflow,
}

impl From<SignatureError> for std::io::Error {
    fn from(e: SignatureError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    }
}
