use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 3-mers, windows of 16 residues,
/// 64-bit signatures, 21% of the term vector non-zero.
pub const DEFAULT_CONFIG: Config = Config {
    word_len: 3,
    partition_size: 16,
    signature_len: 64,
    density: 21,
    index_mode: IndexMode::PerSequence,
    max_terms: None,
};

/// How the index of an output record is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexMode {
    /// One index per input sequence, shared by all of its windows.
    PerSequence,
    /// One index per emitted window, counted over the whole run.
    PerWindow,
}

/// A configure struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of a term (k-mer).
    pub word_len: usize,
    /// Length of a partition window. Windows advance by half of this.
    pub partition_size: usize,
    /// Number of entries in a term vector, i.e., bits in a signature.
    pub signature_len: usize,
    /// Percentage of non-zero entries in a term vector.
    pub density: usize,
    /// How output records are numbered.
    pub index_mode: IndexMode,
    /// Maximum number of distinct terms the cache would hold. None for unbounded.
    pub max_terms: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl Config {
    pub fn new(word_len: usize, partition_size: usize, signature_len: usize, density: usize) -> Self {
        Self {
            word_len,
            partition_size,
            signature_len,
            density,
            ..DEFAULT_CONFIG
        }
    }
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::de::from_reader(std::io::BufReader::new(file))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signature_len == 0 || self.signature_len % 8 != 0 {
            return Err(ConfigError::SignatureLen(self.signature_len));
        }
        if self.word_len == 0 {
            return Err(ConfigError::ZeroWordLen);
        }
        if self.density > 100 {
            return Err(ConfigError::Density(self.density));
        }
        match self.signature_len.checked_mul(self.density) {
            Some(x) if x / 100 <= self.signature_len => {}
            _ => return Err(ConfigError::Density(self.density)),
        }
        if self.partition_size < 2 || self.partition_size % 2 != 0 {
            return Err(ConfigError::PartitionSize(self.partition_size));
        }
        if self.max_terms == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
    /// Number of non-zero entries in a term vector. An odd count loses one entry.
    pub fn non_zero(&self) -> usize {
        self.signature_len * self.density / 100
    }
    /// Number of +1 entries, which equals the number of -1 entries.
    pub fn half_non_zero(&self) -> usize {
        self.non_zero() / 2
    }
    /// Bytes of a packed signature.
    pub fn signature_bytes(&self) -> usize {
        (self.signature_len + 7) / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_is_valid() {
        assert!(DEFAULT_CONFIG.validate().is_ok());
        assert_eq!(DEFAULT_CONFIG.non_zero(), 13);
        assert_eq!(DEFAULT_CONFIG.half_non_zero(), 6);
        assert_eq!(DEFAULT_CONFIG.signature_bytes(), 8);
    }
    #[test]
    fn rejects() {
        let mut config = Config::new(3, 16, 60, 21);
        assert_eq!(config.validate(), Err(ConfigError::SignatureLen(60)));
        config.signature_len = 0;
        assert_eq!(config.validate(), Err(ConfigError::SignatureLen(0)));
        let config = Config::new(0, 16, 64, 21);
        assert_eq!(config.validate(), Err(ConfigError::ZeroWordLen));
        let config = Config::new(3, 16, 64, 101);
        assert_eq!(config.validate(), Err(ConfigError::Density(101)));
        let config = Config::new(3, 16, 64, usize::MAX);
        assert_eq!(config.validate(), Err(ConfigError::Density(usize::MAX)));
        let config = Config::new(3, 15, 64, 21);
        assert_eq!(config.validate(), Err(ConfigError::PartitionSize(15)));
        let config = Config::new(3, 0, 64, 21);
        assert_eq!(config.validate(), Err(ConfigError::PartitionSize(0)));
        let config = Config {
            max_terms: Some(0),
            ..DEFAULT_CONFIG
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }
    #[test]
    fn full_density_is_valid() {
        let config = Config::new(3, 16, 64, 100);
        assert!(config.validate().is_ok());
        assert_eq!(config.half_non_zero(), 32);
        let config = Config::new(3, 16, 8, 0);
        assert!(config.validate().is_ok());
        assert_eq!(config.non_zero(), 0);
    }
    #[test]
    fn json() {
        let config: Config =
            serde_json::from_str(r#"{"word_len":4,"signature_len":128,"index_mode":"PerWindow"}"#)
                .unwrap();
        assert_eq!(config.word_len, 4);
        assert_eq!(config.signature_len, 128);
        assert_eq!(config.partition_size, DEFAULT_CONFIG.partition_size);
        assert_eq!(config.density, DEFAULT_CONFIG.density);
        assert_eq!(config.index_mode, IndexMode::PerWindow);
        assert_eq!(config.max_terms, None);
    }
}
