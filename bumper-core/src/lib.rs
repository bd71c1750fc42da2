//! Board-agnostic core logic for the Bumper RC vehicle firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Motion state machine (deadzones, obstacle gating, hysteresis)
//! - Proximity classification shared by the state machine and diagnostics
//! - Hardware abstraction traits (drive, steering, range sensor)
//! - Per-tick control logic
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod safety;
pub mod state;
pub mod traits;
