//! Streaming extraction of delimiter-separated byte segments.
//!
//! [`Tokenizer`] wraps any [`std::io::Read`] source and repeatedly yields the
//! run of bytes preceding the next occurrence of a caller-supplied delimiter.
//! The source is consumed in fixed-size blocks, and exactly two blocks are
//! live at any moment: the one being scanned and one block of lookahead. A
//! delimiter that straddles the boundary between two physical reads is still
//! found, and memory stays bounded no matter how long the stream runs.
//!
//! The delimiter is an arbitrary non-empty byte sequence and may change
//! between calls on the same tokenizer. Matching is exact — no wildcards, no
//! character-encoding awareness.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use segstream::Tokenizer;
//!
//! let request = &b"GET /index HTTP/1.0\r\nHost: example.com\r\n"[..];
//! let mut tokenizer = Tokenizer::with_read_size(Cursor::new(request), 8);
//!
//! let mut line = [0u8; 64];
//! let len = tokenizer.next_segment(b"\r\n", &mut line)?.unwrap();
//! assert_eq!(&line[..len], b"GET /index HTTP/1.0");
//!
//! let len = tokenizer.next_segment(b"\r\n", &mut line)?.unwrap();
//! assert_eq!(&line[..len], b"Host: example.com");
//! # Ok::<(), segstream::TokenizerError>(())
//! ```

mod block;
mod error;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use error::TokenizerError;
pub use tokenizer::{DEFAULT_READ_SIZE, Tokenizer};
