//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the porter end to end
//! against mock or simulated adapters.  All tests run on the host with
//! no real hardware required.

mod mock_hw;
mod ride_tests;
mod scenario_tests;
