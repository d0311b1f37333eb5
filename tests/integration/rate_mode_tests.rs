//! Rate mode: dispatcher → channel → RateIndicator → outputs.

use std::time::Duration;

use futures_lite::future::block_on;
use twinled::adapters::time::MonotonicClock;
use twinled::app::dispatcher::CommandDispatcher;
use twinled::app::indicator::RateIndicator;
use twinled::app::ports::{Instant, Led, Level};
use twinled::events::RateCommand;
use twinled::fsm::rate::RateIndex;
use twinled::ipc::{ControlChannel, Received};

use crate::mock_hw::{ManualClock, MockOutputs, ScriptedConsole};

fn boot(clock: &ManualClock, outputs: &MockOutputs) -> RateIndicator<MockOutputs, ManualClock> {
    RateIndicator::new(outputs.clone(), clock.clone(), RateIndex::new(3).unwrap()).unwrap()
}

#[test]
fn boot_lights_green_then_alternates_every_2s() {
    let clock = ManualClock::default();
    let outputs = MockOutputs::new();
    let mut ind = boot(&clock, &outputs);
    assert_eq!(outputs.level(Led::Green), Some(Level::Off));
    assert_eq!(outputs.level(Led::Red), Some(Level::Off));

    for (t, lit, dark) in [
        (1, Led::Green, Led::Red),
        (2001, Led::Red, Led::Green),
        (4001, Led::Green, Led::Red),
    ] {
        clock.set(t);
        assert_eq!(ind.machine().remaining(Instant::from_millis(t)), Duration::ZERO);
        ind.handle(Received::TimedOut).unwrap();
        assert_eq!(outputs.level(lit), Some(Level::On));
        assert_eq!(outputs.level(dark), Some(Level::Off));
    }
}

#[test]
fn three_faster_from_boot_reach_500ms_counted_from_last_swap() {
    let clock = ManualClock::default();
    let outputs = MockOutputs::new();
    let mut ind = boot(&clock, &outputs);
    clock.set(1);
    ind.handle(Received::TimedOut).unwrap();

    // 1.2 s into the green interval.
    for t in [1200, 1210, 1220] {
        clock.set(t);
        ind.handle(Received::Event(RateCommand::Faster)).unwrap();
    }
    assert_eq!(ind.machine().index(), RateIndex::new(0).unwrap());
    // 1219 ms elapsed >= 500 ms: swap on the next opportunity.
    assert_eq!(ind.machine().deadline(), Instant::from_millis(1221));

    clock.set(1221);
    ind.handle(Received::TimedOut).unwrap();
    assert_eq!(outputs.level(Led::Red), Some(Level::On));
    assert_eq!(ind.machine().deadline(), Instant::from_millis(1721));
}

#[test]
fn slower_then_faster_inside_interval_keeps_original_start() {
    let clock = ManualClock::default();
    let outputs = MockOutputs::new();
    let mut ind = boot(&clock, &outputs);
    clock.set(1);
    ind.handle(Received::TimedOut).unwrap();
    let writes_before = outputs.calls().len();

    clock.set(501);
    ind.handle(Received::Event(RateCommand::Slower)).unwrap();
    assert_eq!(ind.machine().deadline(), Instant::from_millis(2501));
    clock.set(901);
    ind.handle(Received::Event(RateCommand::Faster)).unwrap();
    assert_eq!(ind.machine().deadline(), Instant::from_millis(2001));

    assert_eq!(outputs.calls().len(), writes_before, "commands must not swap");
}

#[test]
fn live_run_settles_at_500ms_and_stops_on_eof() {
    let channel = ControlChannel::<RateCommand>::new();
    let outputs = MockOutputs::new();
    let console = ScriptedConsole::new(&[(20, "faster"), (20, "faster"), (20, "faster")], 1300);

    let index = std::thread::scope(|s| {
        let dispatcher = s.spawn(|| CommandDispatcher::new(&channel, console).run());
        let mut ind = RateIndicator::new(
            outputs.clone(),
            MonotonicClock::new(),
            RateIndex::new(3).unwrap(),
        )
        .unwrap();
        block_on(ind.run(&channel)).unwrap();
        dispatcher.join().unwrap().unwrap();
        ind.machine().index()
    });

    assert_eq!(index, RateIndex::new(0).unwrap());
    let swaps = outputs.switched_on();
    assert!(swaps.len() >= 2, "expected several swaps, got {swaps:?}");
    for pair in swaps.windows(2) {
        assert_ne!(pair[0].0, pair[1].0, "colours must alternate");
        let gap = pair[1].1 - pair[0].1;
        assert!(
            gap >= Duration::from_millis(450) && gap <= Duration::from_millis(900),
            "swap gap {gap:?} outside 500 ms dwell"
        );
    }
}
