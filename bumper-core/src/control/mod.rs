//! Control loop logic
//!
//! Timing, watchdog and signal plumbing live in the firmware; this module
//! holds the per-tick decision so it can be tested on the host.

pub mod controller;

pub use controller::{Controller, Tick};
