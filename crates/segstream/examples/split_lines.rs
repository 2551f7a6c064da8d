//! Split standard input on a delimiter given as the first argument
//! (defaulting to a line feed) and print one segment per line.
//!
//! ```sh
//! printf 'alpha::beta::gamma' | cargo run --example split_lines -- ::
//! ```

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use segstream::Tokenizer;

fn main() -> ExitCode {
    let delimiter = env::args().nth(1).unwrap_or_else(|| "\n".to_string());
    let mut tokenizer = Tokenizer::new(io::stdin().lock());

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let mut segment = [0u8; 64 * 1024];
    let mut index = 0usize;

    loop {
        match tokenizer.next_segment(delimiter.as_bytes(), &mut segment) {
            Ok(Some(len)) => {
                let _ = write!(stdout, "{index}: ");
                let _ = stdout.write_all(&segment[..len]);
                let _ = writeln!(stdout);
                index += 1;
            }
            Ok(None) => return ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("split_lines: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
}
