//! The amino acid alphabet.
use super::SignatureError;

/// The 20 amino acids, in index order.
pub const AMINO_ACIDS: &[u8; 20] = b"CSTPAGNDEQHRKMILVFYW";

const INVALID: u8 = 0xff;

// Byte -> index into AMINO_ACIDS, or INVALID.
const INVERSE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < AMINO_ACIDS.len() {
        table[AMINO_ACIDS[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Return the index of `symbol` in the alphabet.
#[inline]
pub fn index_of(symbol: u8) -> Option<u8> {
    match INVERSE[symbol as usize] {
        INVALID => None,
        idx => Some(idx),
    }
}

/// Check every byte of `seq`. `offset` is added to the reported position,
/// so callers can report positions relative to the whole sequence.
pub fn validate(seq: &[u8], offset: usize) -> Result<(), SignatureError> {
    match seq.iter().position(|&b| index_of(b).is_none()) {
        Some(pos) => Err(SignatureError::InvalidSymbol {
            symbol: seq[pos],
            position: offset + pos,
        }),
        None => Ok(()),
    }
}
