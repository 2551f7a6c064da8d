//! The two-slot block pipeline backing the tokenizer's bounded lookahead.
//!
//! A [`BlockPair`] owns two fixed-capacity buffers: `active`, which is being
//! scanned byte by byte, and `lookahead`, which holds the next chunk fetched
//! from the source. Rotating the pair promotes the lookahead block to active
//! and refills the vacated buffer with a single read. The two buffers are
//! allocated once and swapped in place, so memory use never grows with the
//! stream.
//!
//! Delimiter comparisons go through [`BlockPair::matches_at`], which reads
//! transparently from the lookahead block when the comparison runs past the
//! active block's valid bytes. When both blocks are out of data the comparison
//! reports "no match" rather than fetching more — lookahead is bounded to
//! exactly one block.

use std::fmt;
use std::io::{self, Read};
use std::mem;

use bstr::BStr;

/// A fixed-capacity buffer plus the count of leading bytes that hold data
/// from the most recent source read. Bytes past `len` are stale garbage from
/// earlier reads and must never be observed.
pub(crate) struct Block {
    buf: Box<[u8]>,
    len: usize,
}

impl Block {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// The valid bytes fetched from the source.
    #[inline]
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, index: usize) -> Option<u8> {
        self.bytes().get(index).copied()
    }

    /// Replace this block's contents with one read from the source. A source
    /// that reports end-of-input (`Ok(0)`) leaves the block empty.
    fn refill<R: Read>(&mut self, source: &mut R) -> io::Result<()> {
        self.len = source.read(&mut self.buf)?;
        Ok(())
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("bytes", &BStr::new(self.bytes()))
            .field("capacity", &self.buf.len())
            .finish()
    }
}

/// The active/lookahead pair. Exclusively owned by the tokenizer; nothing
/// else ever holds or mutates the buffers.
#[derive(Debug)]
pub(crate) struct BlockPair {
    active: Block,
    lookahead: Block,
}

impl BlockPair {
    /// Allocate both blocks at `capacity`, empty. The caller primes them with
    /// two [`rotate`](Self::rotate) calls before scanning.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            active: Block::with_capacity(capacity),
            lookahead: Block::with_capacity(capacity),
        }
    }

    /// Promote the lookahead block to active and issue one read into the
    /// buffer that now occupies the lookahead slot.
    ///
    /// The swap carries the lookahead's previously fetched length into the
    /// active role; the buffers themselves trade places without copying or
    /// reallocating.
    pub(crate) fn rotate<R: Read>(&mut self, source: &mut R) -> io::Result<()> {
        mem::swap(&mut self.active, &mut self.lookahead);
        self.lookahead.refill(source)
    }

    #[inline]
    pub(crate) fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Byte at `index` in the active block. `index` must be within the valid
    /// length.
    #[inline]
    pub(crate) fn active_byte(&self, index: usize) -> u8 {
        self.active.bytes()[index]
    }

    /// Whether `delimiter` occurs at `offset` in the active block, reading
    /// through into the lookahead block's valid bytes when the comparison
    /// extends past the active block's end.
    ///
    /// Runs out of both blocks before the delimiter is fully compared ->
    /// no match. This conflates "delimiter absent" with "not enough fetched
    /// bytes left to tell", which keeps lookahead bounded to one block.
    pub(crate) fn matches_at(&self, delimiter: &[u8], offset: usize) -> bool {
        for (i, &expected) in delimiter.iter().enumerate() {
            let pos = offset + i;
            let found = if pos < self.active.len() {
                self.active.bytes()[pos]
            } else {
                match self.lookahead.get(pos - self.active.len()) {
                    Some(byte) => byte,
                    None => return false,
                }
            };
            if found != expected {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn primed_pair(input: &[u8], capacity: usize) -> (BlockPair, Cursor<Vec<u8>>) {
        let mut source = Cursor::new(input.to_vec());
        let mut pair = BlockPair::with_capacity(capacity);
        pair.rotate(&mut source).unwrap();
        pair.rotate(&mut source).unwrap();
        (pair, source)
    }

    #[test]
    fn rotation_carries_fetched_length_forward() {
        let (pair, _) = primed_pair(b"abcdef", 4);
        assert_eq!(pair.active.bytes(), b"abcd");
        assert_eq!(pair.lookahead.bytes(), b"ef");
    }

    #[test]
    fn rotation_swaps_buffers_without_reallocating() {
        let mut source = Cursor::new(b"abcdefgh".to_vec());
        let mut pair = BlockPair::with_capacity(4);
        pair.rotate(&mut source).unwrap();
        pair.rotate(&mut source).unwrap();

        let active_ptr = pair.active.buf.as_ptr();
        let lookahead_ptr = pair.lookahead.buf.as_ptr();
        pair.rotate(&mut source).unwrap();
        assert_eq!(pair.active.buf.as_ptr(), lookahead_ptr);
        assert_eq!(pair.lookahead.buf.as_ptr(), active_ptr);
    }

    #[test]
    fn exhausted_source_leaves_lookahead_empty() {
        let (mut pair, mut source) = primed_pair(b"ab", 4);
        assert_eq!(pair.active.bytes(), b"ab");
        assert_eq!(pair.lookahead.len(), 0);

        pair.rotate(&mut source).unwrap();
        assert_eq!(pair.active_len(), 0);
        assert_eq!(pair.lookahead.len(), 0);
    }

    #[test]
    fn match_within_active_block() {
        let (pair, _) = primed_pair(b"abcdefgh", 4);
        assert!(pair.matches_at(b"bc", 1));
        assert!(!pair.matches_at(b"bc", 2));
    }

    #[test]
    fn match_spanning_into_lookahead() {
        let (pair, _) = primed_pair(b"abcdefgh", 4);
        // "def" starts at the last byte of the active block.
        assert!(pair.matches_at(b"def", 3));
        assert!(!pair.matches_at(b"dex", 3));
    }

    #[test]
    fn match_fails_when_both_blocks_run_out() {
        let (pair, _) = primed_pair(b"abcdef", 4);
        // Would need two bytes past the end of the fetched data.
        assert!(!pair.matches_at(b"efgh", 4));
        // Same start, but fits exactly within the fetched bytes.
        assert!(pair.matches_at(b"ef", 4));
    }
}
