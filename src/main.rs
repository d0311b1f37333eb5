//! TwinLED — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  dispatcher thread            LocalExecutor (main thread)        │
//! │                                                                  │
//! │  StdConsole ─▶ Command ─▶ ControlChannel ─▶ Rate/StateIndicator  │
//! │  (blocking line read)      (capacity 2)           │              │
//! │                                              SignalFlag          │
//! │                                                   ▼              │
//! │                                             ErrorFlasher         │
//! │                                             (state mode only)    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mode is fixed at build time (`--features state-mode`).  End of
//! console input closes the channel and shuts the controllers down; any
//! task error is a hard fault.
#![deny(unused_must_use)]

use std::thread::JoinHandle;

use anyhow::Result;
use edge_executor::LocalExecutor;
use embedded_hal::digital::OutputPin;
use futures_lite::future;
use log::{error, info};

use twinled::adapters::console::StdConsole;
use twinled::adapters::time::MonotonicClock;
use twinled::app::dispatcher::CommandDispatcher;
use twinled::app::flasher::ErrorFlasher;
use twinled::app::indicator::{RateIndicator, StateIndicator};
use twinled::config::{OperatingMode, SystemConfig};
use twinled::drivers::indicator::IndicatorPins;
use twinled::drivers::task_pin::{DISPATCHER_TASK, spawn_task};
use twinled::error::{Error, Result as TaskResult};
use twinled::events::{Command, RateCommand, StateCommand};
use twinled::fsm::flasher::FlashMachine;
use twinled::fsm::rate::RateIndex;
use twinled::ipc::{ControlChannel, SignalFlag};
use twinled::pins;

// ── Shared IPC ────────────────────────────────────────────────

static RATE_CHANNEL: ControlChannel<RateCommand> = ControlChannel::new();
static STATE_CHANNEL: ControlChannel<StateCommand> = ControlChannel::new();
static ERROR_FLAG: SignalFlag = SignalFlag::new();

// ── Platform bring-up ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_logging() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()?;
    Ok(())
}

#[cfg(target_os = "espidf")]
fn indicator_leds() -> Result<(
    twinled::adapters::board::BoardPin,
    twinled::adapters::board::BoardPin,
)> {
    Ok(twinled::adapters::board::take_indicator_pins()?)
}

#[cfg(not(target_os = "espidf"))]
fn indicator_leds() -> Result<(
    twinled::adapters::virtual_led::LogLed,
    twinled::adapters::virtual_led::LogLed,
)> {
    use twinled::adapters::virtual_led::LogLed;
    Ok((LogLed::new("green"), LogLed::new("red")))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TwinLED v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;
    info!("Config: {}", serde_json::to_string(&config)?);

    let (green, red) = indicator_leds()?;
    match config.mode {
        OperatingMode::Rate => run_rate(&config, green, red)?,
        OperatingMode::State => run_state(&config, green, red)?,
    }

    info!("Console closed, shutting down");
    Ok(())
}

fn run_rate<G: OutputPin, R: OutputPin>(config: &SystemConfig, green: G, red: R) -> Result<()> {
    let index = RateIndex::new(config.initial_rate_index)
        .ok_or(Error::Config("initial_rate_index outside dwell table"))?;
    let outputs = IndicatorPins::new(green, red).active_low(pins::INDICATOR_ACTIVE_LOW);
    let clock = MonotonicClock::new();

    let dispatcher = spawn_dispatcher(&RATE_CHANNEL)?;
    info!("Rate mode ready. Entering control loop.");

    let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
    let result = future::block_on(executor.run(async {
        let mut indicator = RateIndicator::new(outputs, &clock, index)?;
        indicator.run(&RATE_CHANNEL).await
    }));
    finish(dispatcher, result)
}

fn run_state<G: OutputPin, R: OutputPin>(config: &SystemConfig, green: G, red: R) -> Result<()> {
    let green = IndicatorPins::green_only(green).active_low(pins::INDICATOR_ACTIVE_LOW);
    let red = IndicatorPins::red_only(red).active_low(pins::INDICATOR_ACTIVE_LOW);
    let flash = FlashMachine::new(config.flash_period());

    let dispatcher = spawn_dispatcher(&STATE_CHANNEL)?;
    info!("State mode ready. Entering control loop.");

    let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
    let flasher = executor.spawn(async move {
        let mut flasher = ErrorFlasher::new(red, flash)?;
        flasher.run(&ERROR_FLAG).await
    });
    let controller = async move {
        let mut indicator = StateIndicator::new(green, &ERROR_FLAG)?;
        indicator.run(&STATE_CHANNEL).await
    };
    // The flasher never finishes on its own; it only ends the race by
    // failing.
    let result = future::block_on(executor.run(future::or(controller, flasher)));
    finish(dispatcher, result)
}

fn spawn_dispatcher<C: Command>(
    channel: &'static ControlChannel<C>,
) -> Result<JoinHandle<TaskResult<()>>> {
    let handle = spawn_task(DISPATCHER_TASK, move || {
        CommandDispatcher::new(channel, StdConsole::stdio()).run()
    })?;
    Ok(handle)
}

/// Join the dispatcher once the controller has stopped.
fn finish(dispatcher: JoinHandle<TaskResult<()>>, controller: TaskResult<()>) -> Result<()> {
    if let Err(e) = controller {
        hard_fault(&e);
    }
    match dispatcher.join() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => hard_fault(&e),
        Err(_) => anyhow::bail!("dispatcher thread panicked"),
    }
}

/// Invariant violation: log and halt.  On ESP-IDF the abort resets the chip.
fn hard_fault(e: &Error) -> ! {
    error!("HARD FAULT: {} — halting", e);
    log::logger().flush();
    std::process::abort()
}
