//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod sensor;

pub use actuator::{ActuatorError, DriveOutput, SteeringOutput};
pub use sensor::RangeSensor;
