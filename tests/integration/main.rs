//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a subsystem against
//! mock host adapters.  Time is simulated through `tick(delta_ms)`.

mod audio_tests;
mod mock_io;
mod notify_tests;
