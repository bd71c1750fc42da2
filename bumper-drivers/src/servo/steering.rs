//! Steering servo
//!
//! Maps a signed turn (-255..=255) to a servo angle around the 90° center,
//! then to a pulse width inside the servo frame. Positive turn swings the
//! servo below center, matching the linkage on the reference chassis.

use bumper_core::config::SteeringConfig;
use bumper_core::traits::{ActuatorError, SteeringOutput};
use embedded_hal::pwm::SetDutyCycle;

/// Servo angle for straight ahead
pub const CENTER_DEG: u8 = 90;

/// Largest servo angle
pub const MAX_ANGLE_DEG: u8 = 180;

/// Largest turn magnitude
pub const FULL_TURN: i32 = 255;

/// Convert a turn command into a servo angle
///
/// Linear map of -255..=255 onto `+max_offset_deg..=-max_offset_deg`
/// (integer math, truncating), added to the center and kept in 0..=180.
pub fn steering_angle(turn: i32, max_offset_deg: u8) -> u8 {
    let turn = turn.clamp(-FULL_TURN, FULL_TURN);
    let max = max_offset_deg as i32;

    let offset = (turn + FULL_TURN) * (-2 * max) / (2 * FULL_TURN) + max;
    (CENTER_DEG as i32 + offset).clamp(0, MAX_ANGLE_DEG as i32) as u8
}

/// Hobby servo on a PWM channel
pub struct SteeringServo<P> {
    pwm: P,
    config: SteeringConfig,
    angle: u8,
}

impl<P: SetDutyCycle> SteeringServo<P> {
    /// Create a new servo and center it
    ///
    /// The PWM channel must already run at the servo frame period.
    pub fn new(pwm: P, config: SteeringConfig) -> Result<Self, ActuatorError> {
        let mut servo = Self {
            pwm,
            config,
            angle: CENTER_DEG,
        };
        servo.set_angle(CENTER_DEG)?;
        Ok(servo)
    }

    /// Current servo angle
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Pulse width for an angle, in microseconds
    pub fn pulse_width_us(&self, angle: u8) -> u32 {
        let angle = angle.min(MAX_ANGLE_DEG) as u32;
        let min = self.config.min_pulse_us as u32;
        let span = (self.config.max_pulse_us as u32).saturating_sub(min);
        min + span * angle / MAX_ANGLE_DEG as u32
    }

    /// Move to an absolute angle (clamped to 0..=180)
    pub fn set_angle(&mut self, angle: u8) -> Result<(), ActuatorError> {
        let angle = angle.min(MAX_ANGLE_DEG);
        let pulse_us = self.pulse_width_us(angle);
        let period_us = (self.config.period_us as u32).max(1);
        let duty = pulse_us * self.pwm.max_duty_cycle() as u32 / period_us;

        self.pwm
            .set_duty_cycle(duty.min(u16::MAX as u32) as u16)
            .map_err(|_| ActuatorError::Pwm)?;
        self.angle = angle;
        Ok(())
    }

    /// Steer with a signed turn command
    pub fn set_turn(&mut self, turn: i32) -> Result<(), ActuatorError> {
        self.set_angle(steering_angle(turn, self.config.max_offset_deg))
    }
}

impl<P: SetDutyCycle> SteeringOutput for SteeringServo<P> {
    fn set_turn(&mut self, turn: i32) -> Result<(), ActuatorError> {
        SteeringServo::set_turn(self, turn)
    }
}
