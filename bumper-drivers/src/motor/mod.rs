//! Drive motor implementations

pub mod hbridge;

pub use hbridge::{HBridgeDrive, FULL_THROTTLE};
