//! Vehicle motion state
//!
//! The state machine is explicit, finite, and deterministic. It is the only
//! place where throttle and steering decisions are made.

pub mod command;
pub mod machine;

pub use command::Command;
pub use machine::{
    update, MotionState, VehicleState, SENTINEL_DISTANCE_CM, THROTTLE_DEADZONE, TURN_DEADZONE,
};
