//! Line console adapter.
//!
//! Implements [`ConsolePort`] over any `BufRead` + `Write` pair; the binary
//! uses stdin/stdout, which ESP-IDF routes to the UART console.
//!
//! Each line is bounded to [`LINE_CAPACITY`] bytes: the rest of an
//! over-long line is read and dropped so it cannot spill into the next
//! command, and the line is flagged truncated so it is never parsed.
//! Invalid UTF-8 is replaced rather than rejected, so it simply
//! fails to match a keyword.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::app::ports::{ConsoleError, ConsolePort, InputLine, LineEnd};
use crate::config::LINE_CAPACITY;

pub struct StdConsole<R, W> {
    reader: R,
    writer: W,
    buf: Vec<u8>,
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: Vec::with_capacity(LINE_CAPACITY + 2),
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

/// Cut at the first line terminator and keep at most [`LINE_CAPACITY`]
/// bytes, on a character boundary.
pub fn bounded_line(raw: &[u8]) -> InputLine {
    let text = String::from_utf8_lossy(raw);
    let text = text.split(['\r', '\n']).next().unwrap_or_default();

    let mut line = InputLine::default();
    for ch in text.chars() {
        if line.text.push(ch).is_err() {
            line.truncated = true;
            break;
        }
    }
    line
}

impl<R: BufRead, W: Write> ConsolePort for StdConsole<R, W> {
    fn read_line(&mut self) -> Result<Option<InputLine>, ConsoleError> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf).map_err(|e| {
            warn!("console read failed: {}", e);
            ConsoleError::Io
        })?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(bounded_line(&self.buf)))
    }

    fn write_line(&mut self, text: &str, end: LineEnd) -> Result<(), ConsoleError> {
        let result = match end {
            LineEnd::CrLf => write!(self.writer, "{text}\r\n"),
            LineEnd::None => write!(self.writer, "{text}"),
        };
        result.and_then(|()| self.writer.flush()).map_err(|e| {
            warn!("console write failed: {}", e);
            ConsoleError::Io
        })
    }
}
