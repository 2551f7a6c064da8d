//! The segment-extraction state machine.

use std::fmt;
use std::io::Read;

use crate::block::BlockPair;
use crate::error::TokenizerError;

/// Number of bytes fetched from the source per read when the tokenizer is
/// built with [`Tokenizer::new`].
pub const DEFAULT_READ_SIZE: usize = 1024;

/// Extracts delimiter-separated segments from a streaming byte source.
///
/// The source is consumed in blocks of a fixed preferred read size, with one
/// block of lookahead kept live so a delimiter spanning two physical reads is
/// still found. Blocks are allocated lazily on the first extraction call and
/// reused for the lifetime of the tokenizer.
///
/// A tokenizer is bound to one source for that source's entire lifetime:
/// nothing else may read from the source while the tokenizer is in use, or
/// the block boundaries it observes become meaningless. The source is owned
/// by value; pass `&mut reader` to keep ownership at the call site, and use
/// [`into_inner`](Self::into_inner) to take an owned source back out.
///
/// All extraction goes through `&mut self` — the tokenizer is single-threaded
/// and performs blocking reads with no internal buffering beyond the two
/// blocks, no retries, and no timeouts.
///
/// # Failure semantics
///
/// Any error poisons the instance: bytes have already been consumed from the
/// source without being delivered, and the source cannot be rewound, so there
/// is no safe way to continue. Every call after a failure returns
/// [`TokenizerError::Poisoned`]. Callers that can reposition the underlying
/// source should discard the tokenizer and construct a fresh one.
pub struct Tokenizer<R> {
    source: R,
    read_size: usize,
    state: State,
}

#[derive(Debug)]
enum State {
    /// No extraction attempted yet; blocks are not allocated.
    Unprimed,
    /// Blocks are live; `cursor` tracks the scan position in the active one.
    Scanning(Scan),
    /// Terminal. A failure consumed source bytes that never reached the
    /// caller, and the source cannot be replayed.
    Poisoned,
}

#[derive(Debug)]
struct Scan {
    blocks: BlockPair,
    cursor: usize,
}

impl<R> Tokenizer<R> {
    /// Create a tokenizer reading `source` in blocks of
    /// [`DEFAULT_READ_SIZE`] bytes.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self::with_read_size(source, DEFAULT_READ_SIZE)
    }

    /// Create a tokenizer reading `source` in blocks of `read_size` bytes.
    ///
    /// The read size caps how many bytes one source read may return and sets
    /// the lookahead bound: a delimiter longer than the valid bytes remaining
    /// across the two live blocks cannot be matched. Keep delimiters no
    /// longer than `read_size`. Apart from that bound, the read size affects
    /// only how many reads occur, never which segments are produced.
    ///
    /// # Panics
    ///
    /// Panics if `read_size` is zero.
    #[must_use]
    pub fn with_read_size(source: R, read_size: usize) -> Self {
        assert!(read_size > 0, "read size must be non-zero");
        Self {
            source,
            read_size,
            state: State::Unprimed,
        }
    }

    /// The configured preferred read size in bytes.
    #[must_use]
    pub fn read_size(&self) -> usize {
        self.read_size
    }

    /// Whether an earlier failure has made this instance permanently
    /// unusable.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        matches!(self.state, State::Poisoned)
    }

    /// Shared access to the underlying source.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutable access to the underlying source. Reading from it directly
    /// desynchronizes the tokenizer's view of the stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Consume the tokenizer and hand back the source. Bytes already fetched
    /// into the internal blocks are lost.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Tokenizer<R> {
    /// Extract the next segment into `out`, returning its length.
    ///
    /// Scans the stream for the next occurrence of `delimiter`, copying every
    /// preceding byte into `out`. The delimiter itself is consumed but not
    /// copied and not counted. Returns `Ok(None)` once the stream is
    /// exhausted; a final run of bytes with no trailing delimiter is still
    /// returned as a regular (possibly empty) segment first, so `None` always
    /// means "nothing was left to read at all".
    ///
    /// `delimiter` may differ from call to call on the same tokenizer.
    ///
    /// # Errors
    ///
    /// [`TokenizerError::BufferTooSmall`] if `out` fills up before the
    /// delimiter or end-of-input is reached, and
    /// [`TokenizerError::Source`] if the source fails. Both poison the
    /// instance; subsequent calls return [`TokenizerError::Poisoned`].
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is empty.
    pub fn next_segment(
        &mut self,
        delimiter: &[u8],
        out: &mut [u8],
    ) -> Result<Option<usize>, TokenizerError> {
        self.extract(delimiter, Some(out))
    }

    /// Advance past the next segment without copying it, returning its
    /// length.
    ///
    /// Identical to [`next_segment`](Self::next_segment) except that no bytes
    /// are copied and no output capacity is enforced — a segment of any
    /// length can be skipped.
    ///
    /// # Errors
    ///
    /// [`TokenizerError::Source`] if the source fails (poisoning the
    /// instance), and [`TokenizerError::Poisoned`] on any call after a
    /// failure.
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is empty.
    pub fn skip_segment(&mut self, delimiter: &[u8]) -> Result<Option<usize>, TokenizerError> {
        self.extract(delimiter, None)
    }

    fn extract(
        &mut self,
        delimiter: &[u8],
        out: Option<&mut [u8]>,
    ) -> Result<Option<usize>, TokenizerError> {
        assert!(!delimiter.is_empty(), "delimiter must not be empty");
        let result = self.scan(delimiter, out);
        if result.is_err() {
            self.state = State::Poisoned;
        }
        result
    }

    fn scan(
        &mut self,
        delimiter: &[u8],
        mut out: Option<&mut [u8]>,
    ) -> Result<Option<usize>, TokenizerError> {
        if matches!(self.state, State::Poisoned) {
            return Err(TokenizerError::Poisoned);
        }
        if matches!(self.state, State::Unprimed) {
            self.prime()?;
        }
        let Self { source, state, .. } = self;
        let State::Scanning(scan) = state else {
            unreachable!("primed above")
        };

        let mut written = 0usize;
        while scan.blocks.active_len() > 0 {
            while scan.cursor < scan.blocks.active_len() {
                if scan.blocks.matches_at(delimiter, scan.cursor) {
                    scan.cursor += delimiter.len();
                    if scan.cursor > scan.blocks.active_len() {
                        // The delimiter's tail was matched out of the
                        // lookahead block. Rotate so that block becomes
                        // active and land the cursor just past the tail.
                        let consumed_ahead = scan.cursor - scan.blocks.active_len();
                        scan.blocks.rotate(source)?;
                        scan.cursor = consumed_ahead;
                    }
                    return Ok(Some(written));
                }
                if let Some(out) = out.as_deref_mut() {
                    let Some(slot) = out.get_mut(written) else {
                        return Err(TokenizerError::BufferTooSmall { written });
                    };
                    *slot = scan.blocks.active_byte(scan.cursor);
                }
                written += 1;
                scan.cursor += 1;
            }
            scan.blocks.rotate(source)?;
            scan.cursor = 0;
            if scan.blocks.active_len() == 0 {
                // Bytes were consumed on this call, so surface them as the
                // final (possibly empty) segment; the next call reports
                // end-of-stream.
                return Ok(Some(written));
            }
        }
        Ok(None)
    }

    /// Allocate the block pair and warm it up with two rotations: the first
    /// fetch lands in the lookahead slot, the second promotes it to active
    /// and fetches the chunk behind it. The matcher can then always consult a
    /// populated lookahead block, from the very first comparison on.
    fn prime(&mut self) -> Result<(), TokenizerError> {
        let mut blocks = BlockPair::with_capacity(self.read_size);
        blocks.rotate(&mut self.source)?;
        blocks.rotate(&mut self.source)?;
        self.state = State::Scanning(Scan { blocks, cursor: 0 });
        Ok(())
    }
}

impl<R> fmt::Debug for Tokenizer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("read_size", &self.read_size)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
