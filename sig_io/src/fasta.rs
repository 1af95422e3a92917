//! Two-line record reader.
//! Each record is exactly one metadata line followed by exactly one sequence line.
//! Multi-line FASTA is not supported.
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    meta: String,
    seq: Vec<u8>,
}

impl Record {
    pub fn new(meta: &str, seq: &[u8]) -> Self {
        let meta = meta.to_string();
        let seq = seq.to_vec();
        Self { meta, seq }
    }
    /// The first token of the metadata line, without the leading '>'.
    pub fn id(&self) -> &str {
        self.meta
            .trim_start_matches('>')
            .split_whitespace()
            .next()
            .unwrap_or("")
    }
    pub fn meta(&self) -> &str {
        &self.meta
    }
    pub fn seq(&self) -> &[u8] {
        &self.seq
    }
    pub fn into_seq(self) -> Vec<u8> {
        self.seq
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.seq
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.meta)?;
        write!(f, "{}", String::from_utf8_lossy(&self.seq))
    }
}

pub struct Reader<R: BufRead> {
    inner: R,
    buffer: Vec<u8>,
    line: usize,
}

impl Reader<BufReader<std::fs::File>> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            line: 0,
        }
    }
    // Read the next line as raw bytes, with the trailing newline (and '\r') removed.
    // Return None at EOF.
    fn next_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        self.buffer.clear();
        if self.inner.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let mut end = self.buffer.len();
        while end > 0 && (self.buffer[end - 1] == b'\n' || self.buffer[end - 1] == b'\r') {
            end -= 1;
        }
        Ok(Some(self.buffer[..end].to_vec()))
    }
    fn next_record(&mut self) -> std::io::Result<Option<Record>> {
        let meta = loop {
            match self.next_line()? {
                Some(line) if line.is_empty() => continue,
                Some(line) => break String::from_utf8_lossy(&line).into_owned(),
                None => return Ok(None),
            }
        };
        match self.next_line()? {
            Some(seq) => Ok(Some(Record { meta, seq })),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "line {}: metadata line without a sequence line ({})",
                    self.line, meta
                ),
            )),
        }
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = std::io::Result<Record>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Read all records in the file.
pub fn parse_into_vec<P: AsRef<Path>>(file: P) -> std::io::Result<Vec<Record>> {
    Reader::from_file(file)?.collect()
}
