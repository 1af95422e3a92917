//! Flat binary signature files.
//! A file is a concatenation of records, each laid out as
//! `index: i32 (native byte order) || bits: signature_len / 8 bytes`.
//! There is no header, separator, or length prefix, so a reader has to know
//! the signature length out of band, usually from the file name.
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const INDEX_BYTES: usize = std::mem::size_of::<i32>();

/// The output name for `input`, e.g. `qut3.fasta.part16_sigs03_64`.
pub fn signature_file_name<P: AsRef<Path>>(
    input: P,
    partition_size: usize,
    word_len: usize,
    signature_len: usize,
) -> PathBuf {
    let mut name = input.as_ref().as_os_str().to_os_string();
    name.push(format!(
        ".part{}_sigs{:02}_{}",
        partition_size, word_len, signature_len
    ));
    PathBuf::from(name)
}

pub struct Writer<W: Write> {
    inner: BufWriter<W>,
    width: usize,
    records: usize,
}

impl Writer<std::fs::File> {
    pub fn to_file<P: AsRef<Path>>(path: P, signature_len: usize) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(file, signature_len))
    }
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W, signature_len: usize) -> Self {
        Self {
            inner: BufWriter::new(inner),
            width: (signature_len + 7) / 8,
            records: 0,
        }
    }
    pub fn write_record(&mut self, index: i32, bits: &[u8]) -> std::io::Result<()> {
        if bits.len() != self.width {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("expected {} bytes of signature, got {}", self.width, bits.len()),
            ));
        }
        self.inner.write_all(&index.to_ne_bytes())?;
        self.inner.write_all(bits)?;
        self.records += 1;
        Ok(())
    }
    /// Number of records written so far.
    pub fn records(&self) -> usize {
        self.records
    }
    /// Flush the buffer and return the underlying writer.
    pub fn finish(self) -> std::io::Result<W> {
        debug!("Wrote {} signature records", self.records);
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

/// Reads the records of a signature file back, in file order.
pub struct Reader<R: Read> {
    inner: R,
    width: usize,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R, signature_len: usize) -> Self {
        let width = (signature_len + 7) / 8;
        Self { inner, width }
    }
    fn next_record(&mut self) -> std::io::Result<Option<(i32, Vec<u8>)>> {
        let mut buf = vec![0u8; INDEX_BYTES + self.width];
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if filled == 0 {
            Ok(None)
        } else if filled < buf.len() {
            Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("truncated record: {} of {} bytes", filled, buf.len()),
            ))
        } else {
            let mut index = [0u8; INDEX_BYTES];
            index.copy_from_slice(&buf[..INDEX_BYTES]);
            let bits = buf.split_off(INDEX_BYTES);
            Ok(Some((i32::from_ne_bytes(index), bits)))
        }
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = std::io::Result<(i32, Vec<u8>)>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
