//! Motion state machine
//!
//! All throttle and steering output is a function of the previous vehicle
//! state, the operator command, and the measured obstacle distance.
//! Forward motion is gated by distance; braking and reverse never are.

use crate::safety::ProximityZone;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::command::Command;

/// Commands at or below this throttle magnitude count as released
pub const THROTTLE_DEADZONE: u32 = 10;

/// Commands at or below this turn magnitude count as released
pub const TURN_DEADZONE: u32 = 10;

/// Distance reported when no echo came back (nothing in range)
pub const SENTINEL_DISTANCE_CM: f32 = 1000.0;

/// Motion states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionState {
    /// At rest, all outputs zero
    #[default]
    Idle,
    /// Operator is driving or steering
    Moving,
}

/// Complete vehicle state, replaced once per control tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleState {
    /// Current motion state
    pub state: MotionState,
    /// Drive output, -255..=255 (negative = reverse)
    pub throttle: i32,
    /// Steering output, -255..=255
    pub turn: i32,
    /// Distance measured on the last update (cm)
    pub last_distance_cm: f32,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleState {
    /// Power-on state: idle, no output, nothing in range
    pub const fn new() -> Self {
        Self {
            state: MotionState::Idle,
            throttle: 0,
            turn: 0,
            last_distance_cm: SENTINEL_DISTANCE_CM,
        }
    }

    /// Check if the vehicle is idle
    pub fn is_idle(&self) -> bool {
        self.state == MotionState::Idle
    }

    /// Check if the vehicle is moving
    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }

    /// Process a command and return the next state
    pub fn transition(self, command: Command, distance_cm: f32) -> Self {
        update(self, command.throttle, command.turn, distance_cm)
    }
}

/// Compute the next vehicle state
///
/// Total over its whole input domain: commands are not range checked and
/// any distance (including NaN) yields a well-formed state.
pub fn update(
    previous: VehicleState,
    command_throttle: i32,
    command_turn: i32,
    distance_cm: f32,
) -> VehicleState {
    let zone = ProximityZone::classify(distance_cm);
    let throttle_active = command_throttle.unsigned_abs() > THROTTLE_DEADZONE;
    let turn_active = command_turn.unsigned_abs() > TURN_DEADZONE;

    let mut next = VehicleState {
        last_distance_cm: distance_cm,
        ..previous
    };

    match previous.state {
        MotionState::Idle => {
            next.throttle = 0;
            next.turn = 0;

            // Cannot launch into an obstacle
            if (throttle_active || turn_active) && zone.launch_allowed() {
                next.state = MotionState::Moving;
                next.throttle = command_throttle;
                next.turn = command_turn;
            }
        }
        MotionState::Moving => {
            let wants_forward = command_throttle > THROTTLE_DEADZONE as i32;

            next.throttle = if wants_forward {
                match zone {
                    ProximityZone::Blocked => 0,
                    ProximityZone::Hysteresis => previous.throttle,
                    ProximityZone::Clear => command_throttle,
                }
            } else {
                command_throttle
            };
            next.turn = command_turn;

            if !throttle_active && !turn_active {
                next.state = MotionState::Idle;
                next.throttle = 0;
                next.turn = 0;
            }
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(throttle: i32, turn: i32) -> VehicleState {
        VehicleState {
            state: MotionState::Moving,
            throttle,
            turn,
            last_distance_cm: 100.0,
        }
    }

    fn assert_output(state: VehicleState, expected: MotionState, throttle: i32, turn: i32) {
        assert_eq!(state.state, expected);
        assert_eq!(state.throttle, throttle);
        assert_eq!(state.turn, turn);
    }

    #[test]
    fn test_initial_state() {
        let state = VehicleState::new();
        assert_output(state, MotionState::Idle, 0, 0);
        assert_eq!(state.last_distance_cm, SENTINEL_DISTANCE_CM);
        assert_eq!(state, VehicleState::default());
    }

    #[test]
    fn test_idle_stays_idle_without_input() {
        let next = update(VehicleState::new(), 0, 0, 100.0);
        assert_output(next, MotionState::Idle, 0, 0);
    }

    #[test]
    fn test_idle_to_moving() {
        let next = update(VehicleState::new(), 100, 20, 100.0);
        assert_output(next, MotionState::Moving, 100, 20);
    }

    #[test]
    fn test_idle_blocked_by_proximity() {
        let next = update(VehicleState::new(), 100, 20, 10.0);
        assert_output(next, MotionState::Idle, 0, 0);
    }

    #[test]
    fn test_idle_launch_at_stop_distance_blocked() {
        let next = update(VehicleState::new(), 100, 0, 20.0);
        assert_output(next, MotionState::Idle, 0, 0);

        // Anywhere past the stop distance is enough to launch
        let next = update(VehicleState::new(), 100, 0, 20.5);
        assert_output(next, MotionState::Moving, 100, 0);
    }

    #[test]
    fn test_idle_turn_only_starts_moving() {
        let next = update(VehicleState::new(), 0, -40, 100.0);
        assert_output(next, MotionState::Moving, 0, -40);
    }

    #[test]
    fn test_idle_reverse_launch_is_distance_gated() {
        // Launch from rest is gated in both directions
        let next = update(VehicleState::new(), -120, 0, 10.0);
        assert_output(next, MotionState::Idle, 0, 0);
    }

    #[test]
    fn test_deadzone_boundary() {
        let next = update(VehicleState::new(), 10, -10, 100.0);
        assert_output(next, MotionState::Idle, 0, 0);

        let next = update(VehicleState::new(), 11, 0, 100.0);
        assert_output(next, MotionState::Moving, 11, 0);

        let next = update(VehicleState::new(), -11, 0, 100.0);
        assert_output(next, MotionState::Moving, -11, 0);
    }

    #[test]
    fn test_moving_passes_commands_when_clear() {
        let next = update(moving(80, 10), 120, -30, 100.0);
        assert_output(next, MotionState::Moving, 120, -30);
    }

    #[test]
    fn test_moving_forward_blocked() {
        let next = update(moving(80, 0), 120, 0, 15.0);
        assert_output(next, MotionState::Moving, 0, 0);
    }

    #[test]
    fn test_moving_release_returns_to_idle() {
        let next = update(moving(80, 10), 0, 0, 100.0);
        assert_output(next, MotionState::Idle, 0, 0);

        // Release wins even right in front of an obstacle
        let next = update(moving(80, 10), 5, -5, 3.0);
        assert_output(next, MotionState::Idle, 0, 0);
    }

    #[test]
    fn test_reverse_never_blocked() {
        let next = update(moving(0, 0), -120, 0, 10.0);
        assert_output(next, MotionState::Moving, -120, 0);

        let next = update(moving(0, 0), -255, 30, 0.0);
        assert_output(next, MotionState::Moving, -255, 30);
    }

    #[test]
    fn test_hysteresis_holds_previous_throttle() {
        let next = update(moving(0, 0), 120, 0, 22.0);
        assert_output(next, MotionState::Moving, 0, 0);

        let next = update(moving(90, 0), 120, 0, 22.0);
        assert_output(next, MotionState::Moving, 90, 0);
    }

    #[test]
    fn test_resume_distance_is_inside_band() {
        let next = update(moving(0, 0), 120, 0, 25.0);
        assert_output(next, MotionState::Moving, 0, 0);
    }

    #[test]
    fn test_forward_reenabled_past_resume() {
        let next = update(moving(0, 0), 120, 0, 30.0);
        assert_output(next, MotionState::Moving, 120, 0);
    }

    #[test]
    fn test_steering_passes_while_forward_blocked() {
        let next = update(moving(80, 0), 120, 200, 5.0);
        assert_output(next, MotionState::Moving, 0, 200);
    }

    #[test]
    fn test_approach_and_back_away() {
        let mut state = VehicleState::new();
        let forward = Command::new(150, 0);

        // Drive towards the wall
        state = state.transition(forward, 60.0);
        assert_eq!(state.throttle, 150);
        state = state.transition(forward, 24.0);
        assert_eq!(state.throttle, 150);

        // Noisy readings around the stop distance
        state = state.transition(forward, 19.5);
        assert_eq!(state.throttle, 0);
        state = state.transition(forward, 21.0);
        assert_eq!(state.throttle, 0);
        state = state.transition(forward, 19.8);
        assert_eq!(state.throttle, 0);
        state = state.transition(forward, 23.5);
        assert_eq!(state.throttle, 0);

        // Backing away always works
        state = state.transition(Command::new(-100, 0), 18.0);
        assert_output(state, MotionState::Moving, -100, 0);

        // Forward again only once clear of the band
        state = state.transition(forward, 26.0);
        assert_eq!(state.throttle, 150);
    }

    #[test]
    fn test_distance_always_recorded() {
        let next = update(VehicleState::new(), 0, 0, 42.5);
        assert_eq!(next.last_distance_cm, 42.5);

        let next = update(moving(80, 0), 120, 0, 7.0);
        assert_eq!(next.last_distance_cm, 7.0);
    }

    #[test]
    fn test_sentinel_distance_is_clear() {
        let next = update(VehicleState::new(), 200, 0, SENTINEL_DISTANCE_CM);
        assert_output(next, MotionState::Moving, 200, 0);
    }

    #[test]
    fn test_nan_distance_cannot_launch() {
        let next = update(VehicleState::new(), 200, 0, f32::NAN);
        assert_output(next, MotionState::Idle, 0, 0);
    }

    #[test]
    fn test_nan_distance_stops_forward_while_moving() {
        // Unreadable distance does not hold the previous forward throttle
        let next = update(moving(100, 0), 200, 0, f32::NAN);
        assert_output(next, MotionState::Moving, 0, 0);

        // Reverse is still allowed
        let next = update(moving(100, 0), -120, 30, f32::NAN);
        assert_output(next, MotionState::Moving, -120, 30);
    }

    #[test]
    fn test_extreme_commands_do_not_overflow() {
        let next = update(VehicleState::new(), i32::MIN, i32::MIN, 100.0);
        assert_output(next, MotionState::Moving, i32::MIN, i32::MIN);

        let next = update(moving(0, 0), i32::MAX, 0, 100.0);
        assert_output(next, MotionState::Moving, i32::MAX, 0);
    }

    #[test]
    fn test_state_helpers() {
        assert!(VehicleState::new().is_idle());
        assert!(!VehicleState::new().is_moving());
        assert!(moving(10, 0).is_moving());
    }
}
