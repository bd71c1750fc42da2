//! Operator drive command

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Latest throttle/turn request from the operator
///
/// Values are expected pre-clamped to -255..=255 by the command source;
/// the state machine only compares them against its deadzones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Requested drive (negative = reverse)
    pub throttle: i32,
    /// Requested steering
    pub turn: i32,
}

impl Command {
    /// Both controls released
    pub const STOP: Self = Self::new(0, 0);

    /// Create a new command
    pub const fn new(throttle: i32, turn: i32) -> Self {
        Self { throttle, turn }
    }
}
