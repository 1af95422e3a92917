//! Overlapping windows of a sequence.

/// A half-open range `[start, end)` of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionWindow {
    pub start: usize,
    pub end: usize,
}

impl PartitionWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
    pub fn slice<'a>(&self, seq: &'a [u8]) -> &'a [u8] {
        &seq[self.start..self.end]
    }
}

/// Windows of `size` residues starting every `size/2` residues.
/// The first window is always produced, even for a sequence shorter than `size`
/// (or an empty one). After that, a window is produced while its start plus
/// `size/2` is still inside the sequence.
#[derive(Debug, Clone)]
pub struct Partitions {
    len: usize,
    size: usize,
    next: Option<usize>,
}

/// `size` should be even and at least 2, see `Config::validate`.
pub fn partitions(len: usize, size: usize) -> Partitions {
    Partitions {
        len,
        size,
        next: Some(0),
    }
}

impl Iterator for Partitions {
    type Item = PartitionWindow;
    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let step = self.size / 2;
        let end = start + self.size.min(self.len.saturating_sub(start));
        let following = start + step;
        self.next = if step > 0 && following + step < self.len {
            Some(following)
        } else {
            None
        };
        Some(PartitionWindow { start, end })
    }
}
