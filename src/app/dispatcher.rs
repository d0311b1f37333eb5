//! Command dispatcher — console lines in, control events out.
//!
//! ```text
//!  ConsolePort ──read_line──▶ Command::parse ──try_publish──▶ ControlChannel
//!       ▲                          │
//!       └──── "<line> not recognised" ◀── no match / truncated
//! ```
//!
//! Runs on its own thread and suspends only inside the blocking line read.
//! Publication never waits: with one producer and a consumer that drains
//! faster than an operator can type, a full channel is an invariant
//! violation and is returned as an error.

use log::{info, warn};

use super::ports::{ConsolePort, InputLine, LineEnd};
use crate::config::LINE_CAPACITY;
use crate::error::Result;
use crate::events::{Command, NOT_RECOGNISED};
use crate::ipc::ControlChannel;

/// Outcome of [`CommandDispatcher::handle_line`] and
/// [`CommandDispatcher::handle_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<C> {
    /// The line matched and `C` was queued.
    Published(C),
    /// The line matched nothing or was truncated; it was echoed with a
    /// notice.
    Rejected,
}

pub struct CommandDispatcher<'a, C: 'static, P> {
    channel: &'a ControlChannel<C>,
    console: P,
}

impl<'a, C: Command, P: ConsolePort> CommandDispatcher<'a, C, P> {
    pub fn new(channel: &'a ControlChannel<C>, console: P) -> Self {
        Self { channel, console }
    }

    /// Blank line, then the prompt with the cursor left after it.
    pub fn prompt(&mut self) -> Result<()> {
        self.console.write_line("", LineEnd::CrLf)?;
        self.console.write_line(C::PROMPT, LineEnd::None)?;
        Ok(())
    }

    /// Parse one line and publish the command, or echo the rejection.
    pub fn handle_line(&mut self, line: &str) -> Result<Dispatch<C>> {
        match C::parse(line) {
            Some(cmd) => {
                self.channel.try_publish(cmd)?;
                info!("DISPATCH: '{}' -> {:?}", cmd.keyword(), cmd);
                Ok(Dispatch::Published(cmd))
            }
            None => {
                warn!("DISPATCH: rejected '{}'", line);
                self.reject(line)
            }
        }
    }

    /// Dispatch a line read from the console.  A truncated line is
    /// rejected without parsing, whatever its visible prefix says.
    pub fn handle_input(&mut self, input: &InputLine) -> Result<Dispatch<C>> {
        if input.truncated {
            warn!(
                "DISPATCH: rejected line longer than {} bytes '{}'",
                LINE_CAPACITY,
                input.as_str()
            );
            return self.reject(input.as_str());
        }
        self.handle_line(input.as_str())
    }

    fn reject(&mut self, line: &str) -> Result<Dispatch<C>> {
        self.console.write_line(line, LineEnd::None)?;
        self.console.write_line(NOT_RECOGNISED, LineEnd::CrLf)?;
        Ok(Dispatch::Rejected)
    }

    /// Prompt, read and dispatch until the console reports end of input.
    ///
    /// The channel is closed on every exit path so the controller never
    /// waits on a producer that has gone away.
    pub fn run(mut self) -> Result<()> {
        let result = self.serve();
        self.channel.close();
        match &result {
            Ok(()) => info!("DISPATCH: end of input, channel closed"),
            Err(e) => warn!("DISPATCH: stopped: {}", e),
        }
        result
    }

    fn serve(&mut self) -> Result<()> {
        loop {
            self.prompt()?;
            let Some(input) = self.console.read_line()? else {
                return Ok(());
            };
            self.handle_input(&input)?;
        }
    }

    pub fn into_console(self) -> P {
        self.console
    }
}
