//! Configuration type definitions
//!
//! These types represent the vehicle configuration. The firmware fills them
//! from the embedded `vehicle.toml`; every field has a default that matches
//! the reference wiring.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest watchdog period the RP2040 can count
pub const MAX_WATCHDOG_MS: u32 = 8000;

/// Longest allowed control tick
pub const MAX_TICK_MS: u32 = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Control tick is zero or too slow
    InvalidTick,
    /// Watchdog period not longer than the tick, or beyond hardware limit
    InvalidWatchdog,
    /// Steering offset exceeds half the servo range
    InvalidSteeringOffset,
    /// Servo pulse bounds are empty or exceed the frame period
    InvalidPulseRange,
    /// Echo timeout is zero
    InvalidEchoTimeout,
}

/// Ultrasonic ranger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangerConfig {
    /// Time between trigger pulses (ms)
    pub interval_ms: u32,
    /// Give up on an echo after this long (µs)
    pub echo_timeout_us: u32,
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30,
            echo_timeout_us: 30_000,
        }
    }
}

/// Drive motor (H-bridge) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveConfig {
    /// PWM counter top for the speed pin (sets the PWM frequency)
    pub pwm_top: u16,
}

impl Default for DriveConfig {
    fn default() -> Self {
        // 125 MHz / 5000 = 25 kHz, above audible range
        Self { pwm_top: 4999 }
    }
}

/// Steering servo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringConfig {
    /// Maximum deflection either side of center (degrees)
    pub max_offset_deg: u8,
    /// Pulse width at 0° (µs)
    pub min_pulse_us: u16,
    /// Pulse width at 180° (µs)
    pub max_pulse_us: u16,
    /// Servo frame period (µs)
    pub period_us: u16,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_offset_deg: 45,
            min_pulse_us: 1000,
            max_pulse_us: 2000,
            period_us: 20_000,
        }
    }
}

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Control tick period (ms)
    pub tick_ms: u32,
    /// Hardware watchdog period (ms)
    pub watchdog_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            watchdog_ms: 5000,
        }
    }
}

/// Command link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// UART baud rate to the network bridge
    pub baudrate: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

/// Complete vehicle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleConfig {
    pub ranger: RangerConfig,
    pub drive: DriveConfig,
    pub steering: SteeringConfig,
    pub control: ControlConfig,
    pub link: LinkConfig,
}

impl VehicleConfig {
    /// Check values the firmware relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let control = &self.control;
        if control.tick_ms == 0 || control.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::InvalidTick);
        }
        if control.watchdog_ms <= control.tick_ms || control.watchdog_ms > MAX_WATCHDOG_MS {
            return Err(ConfigError::InvalidWatchdog);
        }

        let steering = &self.steering;
        if steering.max_offset_deg > 90 {
            return Err(ConfigError::InvalidSteeringOffset);
        }
        if steering.min_pulse_us >= steering.max_pulse_us
            || steering.max_pulse_us > steering.period_us
        {
            return Err(ConfigError::InvalidPulseRange);
        }

        if self.ranger.echo_timeout_us == 0 {
            return Err(ConfigError::InvalidEchoTimeout);
        }

        Ok(())
    }
}
