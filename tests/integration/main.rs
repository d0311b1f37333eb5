//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one controller end to
//! end against mock adapters.  All tests run on the host with no real
//! hardware required.

mod dispatcher_tests;
mod mock_hw;
mod rate_mode_tests;
mod state_mode_tests;
