//! Shared helpers for the behavioral tests.

use std::io::{self, Read};

/// Serves at most `limit` bytes per `read` call, so tests can exercise
/// sources that legally return less than the buffer's capacity.
pub(crate) struct ShortReader<'a> {
    data: &'a [u8],
    limit: usize,
}

impl<'a> ShortReader<'a> {
    pub(crate) fn new(data: &'a [u8], limit: usize) -> Self {
        assert!(limit > 0);
        Self { data, limit }
    }
}

impl Read for ShortReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.len().min(self.limit).min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Yields `prefix` on the first reads, then fails every read after it with
/// the given error kind.
pub(crate) struct FailingReader {
    prefix: Vec<u8>,
    served: usize,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub(crate) fn new(prefix: &[u8], kind: io::ErrorKind) -> Self {
        Self {
            prefix: prefix.to_vec(),
            served: 0,
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served == self.prefix.len() {
            return Err(io::Error::from(self.kind));
        }
        let n = (self.prefix.len() - self.served).min(buf.len());
        buf[..n].copy_from_slice(&self.prefix[self.served..self.served + n]);
        self.served += n;
        Ok(n)
    }
}

/// Naive in-memory reference for what the tokenizer should produce: split on
/// left-to-right, non-overlapping occurrences of `delimiter`, with the
/// remainder after the last occurrence always surfaced as a final (possibly
/// empty) segment. Empty input produces no segments at all.
pub(crate) fn reference_segments(input: &[u8], delimiter: &[u8]) -> Vec<Vec<u8>> {
    assert!(!delimiter.is_empty());
    if input.is_empty() {
        return Vec::new();
    }
    let mut segments = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos + delimiter.len() <= input.len() {
        if input[pos..].starts_with(delimiter) {
            segments.push(input[start..pos].to_vec());
            pos += delimiter.len();
            start = pos;
        } else {
            pos += 1;
        }
    }
    segments.push(input[start..].to_vec());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_splits_left_to_right() {
        assert_eq!(
            reference_segments(b"abcxyzdef", b"xyz"),
            vec![b"abc".to_vec(), b"def".to_vec()]
        );
        assert_eq!(
            reference_segments(b"xxxxxx", b"xxx"),
            vec![Vec::new(), Vec::new(), Vec::new()]
        );
        assert_eq!(reference_segments(b"", b"x"), Vec::<Vec<u8>>::new());
        assert_eq!(
            reference_segments(b"tailx", b"x"),
            vec![b"tail".to_vec(), Vec::new()]
        );
    }
}
