//! Vehicle controller
//!
//! Owns the single [`VehicleState`] of the device together with the latest
//! operator command, and advances the state machine once per control tick.

use crate::state::{Command, MotionState, VehicleState};
use crate::traits::{ActuatorError, DriveOutput, RangeSensor, SteeringOutput};

/// Result of a single control tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// State after the tick
    pub state: VehicleState,
    /// State tag before the tick, if it changed
    pub changed_from: Option<MotionState>,
}

impl Tick {
    /// Check if the motion state changed during this tick
    pub fn changed(&self) -> bool {
        self.changed_from.is_some()
    }
}

/// Control loop logic, independent of timing and hardware
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: VehicleState,
    command: Command,
}

impl Controller {
    /// Create a controller in the power-on state
    pub fn new() -> Self {
        Self {
            state: VehicleState::new(),
            command: Command::STOP,
        }
    }

    /// Current vehicle state
    pub fn state(&self) -> VehicleState {
        self.state
    }

    /// Latest operator command
    pub fn command(&self) -> Command {
        self.command
    }

    /// Replace the latest operator command
    ///
    /// Takes effect on the next tick.
    pub fn set_command(&mut self, command: Command) {
        self.command = command;
    }

    /// Run one control tick
    ///
    /// Reads the sensor, advances the state machine exactly once and applies
    /// throttle then steering. The new state is kept even if an actuator
    /// write fails; the first error is returned after both writes were tried.
    pub fn tick<R, D, S>(
        &mut self,
        sensor: &mut R,
        drive: &mut D,
        steering: &mut S,
    ) -> Result<Tick, ActuatorError>
    where
        R: RangeSensor,
        D: DriveOutput,
        S: SteeringOutput,
    {
        let distance_cm = sensor.distance_cm();
        let previous = self.state.state;

        self.state = self.state.transition(self.command, distance_cm);

        let drive_result = drive.set_throttle(self.state.throttle);
        let steering_result = steering.set_turn(self.state.turn);
        drive_result?;
        steering_result?;

        Ok(Tick {
            state: self.state,
            changed_from: (previous != self.state.state).then_some(previous),
        })
    }
}
