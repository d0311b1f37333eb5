//! Dispatcher against a scripted console.

use futures_lite::future::block_on;
use twinled::app::dispatcher::{CommandDispatcher, Dispatch};
use twinled::config::LINE_CAPACITY;
use twinled::error::{ChannelError, Error};
use twinled::events::{RateCommand, StateCommand};
use twinled::ipc::{ControlChannel, Received, WaitTimeout};

use crate::mock_hw::ScriptedConsole;

const RATE_PROMPT: &str = "\r\nCommand: faster / slower>";

#[test]
fn typo_is_rejected_and_nothing_is_published() {
    let channel = ControlChannel::<RateCommand>::new();
    let console = ScriptedConsole::immediate(&["fastr"]);
    let output = console.output();

    CommandDispatcher::new(&channel, console).run().unwrap();

    assert_eq!(
        *output.lock().unwrap(),
        format!("{RATE_PROMPT}fastr not recognised\r\n{RATE_PROMPT}")
    );
    assert_eq!(block_on(channel.receive(WaitTimeout::Forever)), Received::Closed);
}

#[test]
fn case_and_partial_matches_are_rejected() {
    let channel = ControlChannel::<StateCommand>::new();
    let console = ScriptedConsole::immediate(&[]);
    let mut d = CommandDispatcher::new(&channel, console);
    for line in ["ON", "of", "resets", "on off", ""] {
        assert_eq!(d.handle_line(line).unwrap(), Dispatch::Rejected, "{line:?}");
    }
    assert!(channel.is_empty());
}

#[test]
fn padded_keyword_is_accepted() {
    let channel = ControlChannel::<StateCommand>::new();
    let mut d = CommandDispatcher::new(&channel, ScriptedConsole::immediate(&[]));
    assert_eq!(
        d.handle_line("  reset\t").unwrap(),
        Dispatch::Published(StateCommand::Reset)
    );
}

#[test]
fn keyword_padded_past_line_capacity_is_rejected() {
    let channel = ControlChannel::<RateCommand>::new();
    let padded: &'static str = "faster                          slower";
    let console = ScriptedConsole::immediate(&[padded, "slower"]);
    let output = console.output();

    CommandDispatcher::new(&channel, console).run().unwrap();

    let echoed = &padded[..LINE_CAPACITY];
    assert_eq!(
        *output.lock().unwrap(),
        format!("{RATE_PROMPT}{echoed} not recognised\r\n{RATE_PROMPT}{RATE_PROMPT}")
    );
    assert_eq!(
        block_on(channel.receive(WaitTimeout::Forever)),
        Received::Event(RateCommand::Slower)
    );
    assert_eq!(block_on(channel.receive(WaitTimeout::Forever)), Received::Closed);
}

#[test]
fn mixed_script_reaches_consumer_in_order() {
    let channel = ControlChannel::<RateCommand>::new();
    let console = ScriptedConsole::new(&[(0, "slower"), (0, "nope"), (0, "faster")], 0);
    CommandDispatcher::new(&channel, console).run().unwrap();

    let received: Vec<_> = std::iter::from_fn(|| {
        match block_on(channel.receive(WaitTimeout::Forever)) {
            Received::Event(cmd) => Some(cmd),
            _ => None,
        }
    })
    .collect();
    assert_eq!(received, [RateCommand::Slower, RateCommand::Faster]);
}

#[test]
fn overrun_without_consumer_is_fatal() {
    let channel = ControlChannel::<StateCommand>::new();
    let console = ScriptedConsole::immediate(&["on", "off", "reset"]);
    let result = CommandDispatcher::new(&channel, console).run();
    assert_eq!(result, Err(Error::Channel(ChannelError::Full)));
    assert!(channel.is_closed());
}
