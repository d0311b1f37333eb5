//! State mode: dispatcher → channel → StateIndicator → flag → ErrorFlasher.

use std::time::Duration;

use futures_lite::future::{self, block_on};
use twinled::app::dispatcher::CommandDispatcher;
use twinled::app::flasher::ErrorFlasher;
use twinled::app::indicator::StateIndicator;
use twinled::app::ports::{Led, Level};
use twinled::events::StateCommand;
use twinled::fsm::flasher::{FlashMachine, FlashState};
use twinled::fsm::state::IndicatorState;
use twinled::ipc::{ControlChannel, SignalFlag};

use crate::mock_hw::{MockOutputs, OutputCall, ScriptedConsole};

const PERIOD: Duration = Duration::from_millis(20);
/// Scheduling slack allowed past each flash period.
const SLACK: Duration = Duration::from_millis(15);

#[test]
fn command_sequence_walks_the_table() {
    let flag = SignalFlag::new();
    let outputs = MockOutputs::new();
    let mut ind = StateIndicator::new(outputs.clone(), &flag).unwrap();
    assert_eq!(ind.state(), IndicatorState::Error);

    let expected = [
        (StateCommand::Reset, IndicatorState::GreenOn, 1),
        (StateCommand::Off, IndicatorState::GreenOff, 1),
        (StateCommand::On, IndicatorState::GreenOn, 1),
        (StateCommand::Off, IndicatorState::GreenOff, 1),
        (StateCommand::Off, IndicatorState::Error, 2),
        (StateCommand::On, IndicatorState::Error, 2),
        (StateCommand::Off, IndicatorState::Error, 2),
        (StateCommand::Reset, IndicatorState::GreenOn, 3),
    ];
    for (cmd, state, signals) in expected {
        ind.handle(cmd).unwrap();
        assert_eq!(ind.state(), state, "after {cmd:?}");
        assert_eq!(flag.pending(), signals, "after {cmd:?}");
    }
    assert_eq!(outputs.level(Led::Green), Some(Level::On));
}

#[test]
fn on_while_green_on_escalates_and_darkens() {
    let flag = SignalFlag::new();
    let outputs = MockOutputs::new();
    let mut ind = StateIndicator::new(outputs.clone(), &flag).unwrap();
    ind.handle(StateCommand::Reset).unwrap();
    ind.handle(StateCommand::On).unwrap();
    assert_eq!(ind.state(), IndicatorState::Error);
    assert_eq!(flag.pending(), 2);
    assert_eq!(outputs.level(Led::Green), Some(Level::Off));
}

/// Red writes strictly inside `(from, to)`.
fn red_between(calls: &[OutputCall], from: Duration, to: Duration) -> usize {
    calls
        .iter()
        .filter(|c| c.led == Led::Red && c.at > from && c.at < to)
        .count()
}

#[test]
fn live_round_trip_flashes_only_while_in_error() {
    let channel = ControlChannel::<StateCommand>::new();
    let flag = SignalFlag::new();
    let outputs = MockOutputs::new();
    let console = ScriptedConsole::new(
        &[
            (100, "reset"),
            (100, "off"),
            (100, "on"),
            (100, "off"),
            (100, "off"),
        ],
        200,
    );

    let (state, flash_state) = std::thread::scope(|s| {
        let dispatcher = s.spawn(|| CommandDispatcher::new(&channel, console).run());

        let mut ind = StateIndicator::new(outputs.clone(), &flag).unwrap();
        let mut flasher = ErrorFlasher::new(outputs.clone(), FlashMachine::new(PERIOD)).unwrap();
        let finished = block_on(future::or(
            async { Some(ind.run(&channel).await) },
            async {
                let _ = flasher.run(&flag).await;
                None
            },
        ));
        assert_eq!(finished, Some(Ok(())), "indicator must stop on close");
        dispatcher.join().unwrap().unwrap();
        (ind.state(), flasher.state())
    });

    assert_eq!(state, IndicatorState::Error);
    assert_ne!(flash_state, FlashState::Idle);

    let green = outputs.writes_to(Led::Green);
    let levels: Vec<_> = green.iter().map(|c| c.level).collect();
    // boot, reset, off, on, off; the final off escalates without a write.
    assert_eq!(levels, [Level::Off, Level::On, Level::Off, Level::On, Level::Off]);

    let calls = outputs.calls();
    let reset_at = green[1].at;
    let last_off_at = green[4].at;

    // Flashing from boot until reset.
    let red_boot: Vec<_> = outputs
        .writes_to(Led::Red)
        .into_iter()
        .filter(|c| c.at < reset_at)
        .collect();
    assert!(red_boot.len() >= 3, "expected flashing before reset: {red_boot:?}");
    for pair in red_boot.windows(2) {
        assert_ne!(pair[0].level, pair[1].level);
    }
    // The boot write precedes `run`; toggles after it are one period apart.
    for pair in red_boot[1..].windows(2) {
        let gap = pair[1].at - pair[0].at;
        assert!(
            gap >= PERIOD - Duration::from_millis(2) && gap <= PERIOD + SLACK,
            "red toggle gap {gap:?} outside one period"
        );
    }

    // Healthy: no red activity after the stand-down settles.
    assert_eq!(
        red_between(&calls, reset_at + Duration::from_millis(10), last_off_at),
        0
    );

    // Escalated again by the final "off": flashing resumes.
    assert!(red_between(&calls, last_off_at, Duration::MAX) >= 2);
}
