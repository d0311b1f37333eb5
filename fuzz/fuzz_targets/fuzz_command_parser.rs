//! Fuzz target: `Command::parse` + `CommandDispatcher::handle_line`
//!
//! Feeds arbitrary text through both vocabularies and the dispatcher and
//! asserts that only exact keywords are ever published, and that a
//! rejected line leaves the channel untouched.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use twinled::app::dispatcher::{CommandDispatcher, Dispatch};
use twinled::app::ports::{ConsoleError, ConsolePort, InputLine, LineEnd};
use twinled::events::{Command, RateCommand, StateCommand};
use twinled::ipc::ControlChannel;

struct Sink;

impl ConsolePort for Sink {
    fn read_line(&mut self) -> Result<Option<InputLine>, ConsoleError> {
        Ok(None)
    }

    fn write_line(&mut self, _text: &str, _end: LineEnd) -> Result<(), ConsoleError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if let Some(cmd) = RateCommand::parse(line) {
        assert_eq!(cmd.keyword(), line.trim());
    }
    if let Some(cmd) = StateCommand::parse(line) {
        assert_eq!(cmd.keyword(), line.trim());
    }

    let channel = ControlChannel::<StateCommand>::new();
    let mut dispatcher = CommandDispatcher::new(&channel, Sink);
    match dispatcher.handle_line(line) {
        Ok(Dispatch::Published(_)) => assert_eq!(channel.len(), 1),
        Ok(Dispatch::Rejected) => assert!(channel.is_empty()),
        Err(e) => panic!("single line must not fail: {e}"),
    }
});
