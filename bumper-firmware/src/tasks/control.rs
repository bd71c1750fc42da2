//! Control loop task
//!
//! Runs the motion state machine at a fixed tick:
//! - Picks up the latest operator command
//! - Reads the most recent range measurement
//! - Drives the motor and steering servo
//! - Feeds the hardware watchdog

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Ticker};

use bumper_core::config::ControlConfig;
use bumper_core::control::Controller;
use bumper_core::safety::ProximityZone;
use bumper_drivers::motor::HBridgeDrive;
use bumper_drivers::sensor::UltrasonicRanger;
use bumper_drivers::servo::SteeringServo;

use crate::channels::{COMMAND, ECHO};

/// Drive motor as wired on the board
pub type Drive = HBridgeDrive<Output<'static>, Output<'static>, PwmOutput<'static>>;

/// Steering servo as wired on the board
pub type Steering = SteeringServo<PwmOutput<'static>>;

/// Control task
///
/// The watchdog must already be started; a stalled loop resets the board.
#[embassy_executor::task]
pub async fn control_task(
    mut drive: Drive,
    mut steering: Steering,
    mut watchdog: Watchdog,
    config: ControlConfig,
) {
    info!("Control task started");

    let mut controller = Controller::new();
    let mut ranger = UltrasonicRanger::new(&ECHO);
    let mut zone = ProximityZone::classify(ranger.last_distance_cm());

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));

    loop {
        if let Some(command) = COMMAND.try_take() {
            trace!("Command: ud={}, lr={}", command.throttle, command.turn);
            controller.set_command(command);
        }

        match controller.tick(&mut ranger, &mut drive, &mut steering) {
            Ok(tick) => {
                if let Some(from) = tick.changed_from {
                    info!(
                        "{:?} -> {:?} (ud={}, lr={}, {} cm)",
                        from,
                        tick.state.state,
                        tick.state.throttle,
                        tick.state.turn,
                        tick.state.last_distance_cm
                    );
                }
            }
            Err(e) => {
                warn!("Actuator write failed: {:?}", e);
            }
        }

        let current = ProximityZone::classify(controller.state().last_distance_cm);
        if current != zone {
            debug!(
                "Proximity {:?} -> {:?} at {} cm",
                zone,
                current,
                controller.state().last_distance_cm
            );
            zone = current;
        }

        watchdog.feed();
        ticker.next().await;
    }
}
