//! Obstacle safety policy
//!
//! Distance thresholds shared by the state machine and diagnostics.

pub mod proximity;

pub use proximity::{ProximityZone, RESUME_DISTANCE_CM, STOP_DISTANCE_CM};
