//! Fuzz target: `StdConsole::read_line`
//!
//! Streams arbitrary bytes through the bounded line reader and asserts
//! every line fits `LINE_CAPACITY`, carries no terminator, is flagged
//! truncated exactly when it filled the buffer and was cut, and that the
//! reader always reaches end of input.
//!
//! cargo fuzz run fuzz_line_reader

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use twinled::adapters::console::StdConsole;
use twinled::app::ports::ConsolePort;
use twinled::config::LINE_CAPACITY;

fuzz_target!(|data: &[u8]| {
    let mut console = StdConsole::new(Cursor::new(data), Vec::new());
    let max_lines = data.iter().filter(|b| **b == b'\n').count() + 1;

    let mut lines = 0;
    while let Some(line) = console.read_line().expect("in-memory reads cannot fail") {
        assert!(line.text.len() <= LINE_CAPACITY, "line exceeds LINE_CAPACITY");
        assert!(!line.text.contains(['\r', '\n']), "terminator leaked into line");
        if line.truncated {
            assert!(line.text.len() + 4 > LINE_CAPACITY, "truncated with room left");
        }
        lines += 1;
        assert!(lines <= max_lines, "reader produced more lines than input");
    }
});
