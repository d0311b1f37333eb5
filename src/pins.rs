//! GPIO assignments for the indicator board.
//!
//! Single source of truth: the board bring-up references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Indicator LEDs (discrete, driven through series resistors)
// ---------------------------------------------------------------------------

/// Primary (healthy / "go") output.
pub const GREEN_LED_GPIO: i32 = 12;
/// Secondary / error output.
pub const RED_LED_GPIO: i32 = 11;

/// LEDs are wired anode-to-GPIO: HIGH lights them.
pub const INDICATOR_ACTIVE_LOW: bool = false;
