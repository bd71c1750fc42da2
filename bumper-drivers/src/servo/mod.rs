//! Steering servo implementations

pub mod steering;

pub use steering::{steering_angle, SteeringServo, CENTER_DEG};
