//! H-bridge drive motor
//!
//! This driver provides:
//! - Signed throttle (-255..=255) mapped to a speed duty cycle
//! - Direction selection through two direction pins
//! - Both direction pins low (coast) at zero throttle
//!
//! Works with any `embedded-hal` 1.0 output pins and PWM channel, e.g.
//! L298N or TB6612 style drivers.

use core::cmp::Ordering;

use bumper_core::traits::{ActuatorError, DriveOutput};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// Throttle magnitude that maps to full duty
pub const FULL_THROTTLE: i32 = 255;

/// Drive motor behind an H-bridge
pub struct HBridgeDrive<F, B, S> {
    forward: F,
    back: B,
    speed: S,
    /// Last throttle applied (after clamping)
    throttle: i32,
}

impl<F, B, S> HBridgeDrive<F, B, S>
where
    F: OutputPin,
    B: OutputPin,
    S: SetDutyCycle,
{
    /// Create a new drive and make sure the motor is off
    pub fn new(forward: F, back: B, speed: S) -> Result<Self, ActuatorError> {
        let mut drive = Self {
            forward,
            back,
            speed,
            throttle: 0,
        };
        drive.set_throttle(0)?;
        Ok(drive)
    }

    /// Last applied throttle
    pub fn throttle(&self) -> i32 {
        self.throttle
    }

    /// Apply a signed throttle
    pub fn set_throttle(&mut self, throttle: i32) -> Result<(), ActuatorError> {
        let throttle = throttle.clamp(-FULL_THROTTLE, FULL_THROTTLE);
        let magnitude = throttle.unsigned_abs() as u16;

        self.speed
            .set_duty_cycle_fraction(magnitude, FULL_THROTTLE as u16)
            .map_err(|_| ActuatorError::Pwm)?;

        let (forward, back) = match throttle.cmp(&0) {
            Ordering::Greater => (true, false),
            Ordering::Less => (false, true),
            Ordering::Equal => (false, false),
        };
        self.forward
            .set_state(forward.into())
            .map_err(|_| ActuatorError::Pin)?;
        self.back
            .set_state(back.into())
            .map_err(|_| ActuatorError::Pin)?;

        self.throttle = throttle;
        Ok(())
    }

    /// Release the pins and PWM channel
    pub fn release(self) -> (F, B, S) {
        (self.forward, self.back, self.speed)
    }
}

impl<F, B, S> DriveOutput for HBridgeDrive<F, B, S>
where
    F: OutputPin,
    B: OutputPin,
    S: SetDutyCycle,
{
    fn set_throttle(&mut self, throttle: i32) -> Result<(), ActuatorError> {
        HBridgeDrive::set_throttle(self, throttle)
    }
}
