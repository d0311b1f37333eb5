//! System configuration parameters
//!
//! Fixed timing tables and the per-deployment settings of the indicator
//! controller.  Nothing here is operator-editable: the console vocabulary
//! is the only runtime input.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Dwell times (ms) selectable in rate mode, shortest first.
pub const DWELL_TABLE_MS: [u32; 8] = [500, 1000, 1500, 2000, 2500, 3000, 3500, 4000];

/// Control channel capacity.
pub const CONTROL_DEPTH: usize = 2;

/// Maximum characters kept from one console line.
pub const LINE_CAPACITY: usize = 32;

/// Shortest wait the controller ever schedules; used to force a swap on
/// the very next scheduling opportunity.
pub const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Which controller this deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// `faster` / `slower` adjust the green/red alternation rate.
    Rate,
    /// `on` / `off` / `reset` drive green directly; misuse flashes red.
    State,
}

impl OperatingMode {
    /// Mode selected by the build: state mode with the `state-mode`
    /// feature, rate mode otherwise.
    pub const fn from_build() -> Self {
        if cfg!(feature = "state-mode") {
            Self::State
        } else {
            Self::Rate
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Controller variant for this deployment.
    pub mode: OperatingMode,
    /// Index into [`DWELL_TABLE_MS`] used at boot (rate mode).
    pub initial_rate_index: usize,
    /// Half-period of the red error flash (state mode), in milliseconds.
    pub flash_period_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::from_build(),
            initial_rate_index: 3, // 2000 ms
            flash_period_ms: 500,
        }
    }
}

impl SystemConfig {
    /// Reject values the controllers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_rate_index >= DWELL_TABLE_MS.len() {
            return Err(ConfigError::ValidationFailed(
                "initial_rate_index outside dwell table",
            ));
        }
        if self.flash_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("flash_period_ms must be > 0"));
        }
        Ok(())
    }

    /// Flash half-period as a [`Duration`].
    pub fn flash_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.flash_period_ms))
    }
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names it.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
