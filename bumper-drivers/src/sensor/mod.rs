//! Distance sensor implementations

pub mod ultrasonic;

pub use ultrasonic::{Echo, EchoCapture, UltrasonicRanger, SPEED_OF_SOUND_CM_PER_US};
