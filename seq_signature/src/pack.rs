//! Thresholding accumulators into bits.

/// A signature of one window, tagged with its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRecord {
    pub index: i32,
    pub bits: Vec<u8>,
}

impl PackedRecord {
    pub fn new(index: i32, bits: Vec<u8>) -> Self {
        Self { index, bits }
    }
}

impl std::fmt::Display for PackedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\t", self.index)?;
        for b in self.bits.iter() {
            write!(f, "{:08b}", b)?;
        }
        Ok(())
    }
}

/// Bit `j` (most significant first) of byte `i` is set iff `acc[8*i+j] > 0`.
/// Zero and negative entries both give 0. A trailing partial byte is padded with 0.
pub fn pack(acc: &[i32]) -> Vec<u8> {
    acc.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .filter(|&(_, &x)| x > 0)
                .fold(0u8, |byte, (j, _)| byte | (0b1000_0000 >> j))
        })
        .collect()
}
