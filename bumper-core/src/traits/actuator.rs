//! Actuator traits
//!
//! The control loop drives the vehicle only through these traits, so the
//! same loop runs against the RP2040 peripherals and host-side fakes.

/// Errors reported by actuator implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// A direction or enable pin could not be driven
    Pin,
    /// The PWM peripheral rejected the duty cycle
    Pwm,
}

/// Drive motor output
pub trait DriveOutput {
    /// Apply a signed throttle, -255..=255 (negative = reverse)
    ///
    /// Values outside the range are clamped by the implementation.
    fn set_throttle(&mut self, throttle: i32) -> Result<(), ActuatorError>;
}

/// Steering output
pub trait SteeringOutput {
    /// Apply a signed turn, -255..=255
    ///
    /// Values outside the range are clamped by the implementation.
    fn set_turn(&mut self, turn: i32) -> Result<(), ActuatorError>;
}
