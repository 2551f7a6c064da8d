use std::io;

use thiserror::Error;

/// Failures surfaced by [`Tokenizer`](crate::Tokenizer) extraction calls.
///
/// Every variant is fatal to the tokenizer instance: by the time an error is
/// observed, bytes have been consumed from the source without reaching the
/// caller, and the source cannot be rewound. The instance refuses all further
/// calls with [`TokenizerError::Poisoned`].
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// The caller's output buffer filled up before the delimiter (or
    /// end-of-input) was reached. `written` bytes were copied before the
    /// capacity ran out.
    #[error("output buffer full after {written} bytes with no delimiter found")]
    BufferTooSmall {
        /// Number of bytes copied into the output buffer before it ran out.
        written: usize,
    },

    /// The tokenizer was called after an earlier failure already poisoned it.
    #[error("tokenizer is unusable after an earlier failure")]
    Poisoned,

    /// The underlying byte source failed. The error is propagated untouched;
    /// reads are never retried, including [`io::ErrorKind::Interrupted`].
    #[error("byte source read failed")]
    Source(#[from] io::Error),
}
