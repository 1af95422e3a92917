//! Signing whole sequences, and streams of them, with one shared term cache.
use super::accumulate::accumulate;
use super::alphabet;
use super::cache::TermCache;
use super::pack::PackedRecord;
use super::partition::partitions;
use super::{Config, IndexMode, SignatureError};
use rayon::prelude::*;
use sig_io::fasta::Record;
use sig_io::sigfile;
use std::io::Write;

/// The state of one run: the validated configuration and the term cache.
/// All the signing methods take `&self`, so a `Signer` can be shared across
/// the rayon pool.
#[derive(Debug)]
pub struct Signer {
    cache: TermCache,
}

impl Signer {
    pub fn new(config: Config) -> Result<Self, SignatureError> {
        let cache = TermCache::new(&config)?;
        Ok(Self { cache })
    }
    pub fn config(&self) -> &Config {
        self.cache.config()
    }
    pub fn cache(&self) -> &TermCache {
        &self.cache
    }
    /// The packed signature of a single window.
    pub fn sign_window(&self, window: &[u8]) -> Result<Vec<u8>, SignatureError> {
        accumulate(window, &self.cache).map(|acc| acc.pack())
    }
    /// One packed signature per partition window, in window order.
    /// A symbol outside the alphabet anywhere in `seq` rejects the whole sequence.
    pub fn sign_sequence(&self, seq: &[u8]) -> Result<Vec<Vec<u8>>, SignatureError> {
        alphabet::validate(seq, 0)?;
        partitions(seq.len(), self.config().partition_size)
            .map(|w| self.sign_window(w.slice(seq)))
            .collect()
    }
    /// Sign sequences in parallel. The i-th result belongs to the i-th sequence,
    /// whatever order the workers finish in.
    pub fn sign_batch<S>(&self, seqs: &[S]) -> Vec<Result<Vec<Vec<u8>>, SignatureError>>
    where
        S: AsRef<[u8]> + Sync,
    {
        seqs.par_iter()
            .map(|seq| self.sign_sequence(seq.as_ref()))
            .collect()
    }
}

/// Assigns indices to signed windows, in input order.
#[derive(Debug, Clone)]
pub struct Numbering {
    mode: IndexMode,
    sequences: usize,
    windows: usize,
}

impl Numbering {
    pub fn new(mode: IndexMode) -> Self {
        Self {
            mode,
            sequences: 0,
            windows: 0,
        }
    }
    /// Tag the windows of the next sequence.
    pub fn records(&mut self, windows: Vec<Vec<u8>>) -> Result<Vec<PackedRecord>, SignatureError> {
        let sequence = to_index(self.sequences)?;
        let records = windows
            .into_iter()
            .enumerate()
            .map(|(i, bits)| -> Result<PackedRecord, SignatureError> {
                let index = match self.mode {
                    IndexMode::PerSequence => sequence,
                    IndexMode::PerWindow => to_index(self.windows + i)?,
                };
                Ok(PackedRecord::new(index, bits))
            })
            .collect::<Result<Vec<_>, SignatureError>>()?;
        self.sequences += 1;
        self.windows += records.len();
        Ok(records)
    }
    /// Consume the index of a sequence that produced no records.
    pub fn skip(&mut self) {
        self.sequences += 1;
    }
}

fn to_index(x: usize) -> Result<i32, SignatureError> {
    use std::convert::TryFrom;
    i32::try_from(x).map_err(|_| SignatureError::IndexOverflow)
}

/// What happens to a sequence holding a symbol outside the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPolicy {
    /// Stop the run with an error.
    Abort,
    /// Emit nothing for the sequence, but still consume its index.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sequences: usize,
    pub skipped: usize,
    pub records: usize,
}

/// Read every record, sign them `batch` at a time on the rayon pool,
/// and write the signatures in input order.
pub fn sign_records<I, W>(
    signer: &Signer,
    records: I,
    out: &mut sigfile::Writer<W>,
    batch: usize,
    policy: InvalidPolicy,
) -> std::io::Result<RunSummary>
where
    I: IntoIterator<Item = std::io::Result<Record>>,
    W: Write,
{
    let batch = batch.max(1);
    let mut numbering = Numbering::new(signer.config().index_mode);
    let mut summary = RunSummary::default();
    let mut records = records.into_iter();
    let mut buffer: Vec<Record> = Vec::with_capacity(batch);
    loop {
        buffer.clear();
        for record in records.by_ref().take(batch) {
            buffer.push(record?);
        }
        if buffer.is_empty() {
            break;
        }
        let signed = signer.sign_batch(&buffer);
        for (record, result) in buffer.iter().zip(signed) {
            summary.sequences += 1;
            let windows = match (result, policy) {
                (Ok(windows), _) => windows,
                (Err(SignatureError::InvalidSymbol { symbol, position }), InvalidPolicy::Skip) => {
                    warn!(
                        "Skipped {}: invalid symbol {:?} at {}",
                        record.id(),
                        symbol as char,
                        position
                    );
                    numbering.skip();
                    summary.skipped += 1;
                    continue;
                }
                (Err(why), _) => {
                    let message = format!("{}: {}", record.id(), why);
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        message,
                    ));
                }
            };
            for packed in numbering.records(windows)? {
                out.write_record(packed.index, &packed.bits)?;
                summary.records += 1;
            }
        }
        debug!(
            "{} sequences, {} records, {} terms",
            summary.sequences,
            summary.records,
            signer.cache().len()
        );
    }
    Ok(summary)
}
