//! Contiguous read planning.
//!
//! Extraction reads a handful of segment byte ranges out of a large (often
//! remote) file; adjacent ranges are merged so the source is touched with as
//! few discrete reads as possible.

/// One contiguous read against the media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRun {
    pub offset: u64,
    pub size: u64,
}

impl ByteRun {
    /// First byte past this run.
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// Merge `(offset, size)` ranges into a minimal ordered list of contiguous
/// runs.
///
/// Ranges are sorted by offset; a range starting exactly at the end of the
/// current run extends it, anything else opens a new run. Empty ranges are
/// dropped.
pub fn coalesce(ranges: &[(u64, u64)]) -> Vec<ByteRun> {
    let mut sorted = ranges.to_vec();
    sorted.sort_unstable();

    let mut runs: Vec<ByteRun> = Vec::new();
    for &(offset, size) in &sorted {
        if size == 0 {
            continue;
        }
        if let Some(last) = runs.last_mut() {
            if offset == last.end() {
                last.size += size;
                continue;
            }
        }
        runs.push(ByteRun { offset, size });
    }
    runs
}
