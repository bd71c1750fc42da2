//! Configuration types
//!
//! Board-agnostic configuration structures for the vehicle.

pub mod types;

pub use types::*;
