//! Mock adapters for integration tests.
//!
//! Records every output write with its timestamp so tests can assert on
//! the full history, and scripts console input with per-line delays.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant as StdInstant};

use twinled::adapters::console::bounded_line;
use twinled::app::ports::{
    Clock, ConsoleError, ConsolePort, InputLine, Instant, Led, Level, LineEnd, OutputError,
    OutputPort,
};

// ── Output record ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputCall {
    pub led: Led,
    pub level: Level,
    /// Time since the mock was created.
    pub at: Duration,
}

// ── MockOutputs ───────────────────────────────────────────────

/// Shared-log output port.  Clones append to the same history, so one
/// clone can be handed to each task.
#[derive(Clone)]
pub struct MockOutputs {
    calls: Rc<RefCell<Vec<OutputCall>>>,
    origin: StdInstant,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            origin: StdInstant::now(),
        }
    }

    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.borrow().clone()
    }

    /// Writes to one output, in order.
    pub fn writes_to(&self, led: Led) -> Vec<OutputCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.led == led)
            .copied()
            .collect()
    }

    /// Last level written to `led`.
    pub fn level(&self, led: Led) -> Option<Level> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|c| c.led == led)
            .map(|c| c.level)
    }

    /// Times at which an output was switched on.
    pub fn switched_on(&self) -> Vec<(Led, Duration)> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.level == Level::On)
            .map(|c| (c.led, c.at))
            .collect()
    }
}

impl Default for MockOutputs {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPort for MockOutputs {
    fn write_output(&mut self, led: Led, level: Level) -> Result<(), OutputError> {
        self.calls.borrow_mut().push(OutputCall {
            led,
            level,
            at: self.origin.elapsed(),
        });
        Ok(())
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when the test says so.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

#[allow(dead_code)]
impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.0.get())
    }
}

// ── ScriptedConsole ───────────────────────────────────────────

/// Console that replays `(delay, line)` pairs, bounded as the real console
/// bounds them, then reports end of input after `eof_delay`.  Output is shared so it survives the dispatcher.
pub struct ScriptedConsole {
    script: VecDeque<(Duration, &'static str)>,
    eof_delay: Duration,
    output: Arc<Mutex<String>>,
}

#[allow(dead_code)]
impl ScriptedConsole {
    pub fn new(script: &[(u64, &'static str)], eof_delay_ms: u64) -> Self {
        Self {
            script: script
                .iter()
                .map(|(ms, line)| (Duration::from_millis(*ms), *line))
                .collect(),
            eof_delay: Duration::from_millis(eof_delay_ms),
            output: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Every line arrives immediately.
    pub fn immediate(lines: &[&'static str]) -> Self {
        let script: Vec<_> = lines.iter().map(|l| (0, *l)).collect();
        Self::new(&script, 0)
    }

    pub fn output(&self) -> Arc<Mutex<String>> {
        Arc::clone(&self.output)
    }
}

impl ConsolePort for ScriptedConsole {
    fn read_line(&mut self) -> Result<Option<InputLine>, ConsoleError> {
        match self.script.pop_front() {
            Some((delay, text)) => {
                std::thread::sleep(delay);
                Ok(Some(bounded_line(text.as_bytes())))
            }
            None => {
                std::thread::sleep(self.eof_delay);
                Ok(None)
            }
        }
    }

    fn write_line(&mut self, text: &str, end: LineEnd) -> Result<(), ConsoleError> {
        let mut out = self.output.lock().map_err(|_| ConsoleError::Io)?;
        out.push_str(text);
        if end == LineEnd::CrLf {
            out.push_str("\r\n");
        }
        Ok(())
    }
}
