#![no_main]

use std::io::Cursor;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use segstream::Tokenizer;

#[derive(Debug, Arbitrary)]
struct Case {
    data: Vec<u8>,
    delimiter: Vec<u8>,
    read_size: u8,
}

/// Left-to-right, non-overlapping split of the whole input, with the
/// remainder after the last occurrence kept as a final (possibly empty)
/// segment. Mirrors what the tokenizer promises for sources whose reads
/// always fill the block.
fn reference_segments(input: &[u8], delimiter: &[u8]) -> Vec<Vec<u8>> {
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

fn run(case: &Case) {
    if case.delimiter.is_empty() || case.delimiter.len() > 8 {
        return;
    }
    let read_size = usize::from(case.read_size % 128 + 1);

    let mut tokenizer = Tokenizer::with_read_size(Cursor::new(case.data.clone()), read_size);
    let mut out = vec![0u8; case.data.len()];
    let mut segments = Vec::new();
    let mut consumed = 0usize;
    while let Some(len) = tokenizer
        .next_segment(&case.delimiter, &mut out)
        .expect("in-memory source cannot fail and the output always fits")
    {
        segments.push(out[..len].to_vec());
        consumed += len;
        assert!(consumed <= case.data.len());
    }

    // A cursor fills every read, so the one-block lookahead bound only comes
    // into play for delimiters longer than a block; below that the tokenizer
    // must agree with a naive whole-input split.
    if case.delimiter.len() <= read_size {
        assert_eq!(segments, reference_segments(&case.data, &case.delimiter));
    }

    // However the input was split, segment bytes plus consumed delimiters
    // must add back up to the input.
    let delimited: usize = segments.iter().map(Vec::len).sum();
    let gaps = case.data.len() - delimited;
    assert!(gaps.is_multiple_of(case.delimiter.len()));
}

fuzz_target!(|case: Case| run(&case));
