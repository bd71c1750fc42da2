//! Ultrasonic ranger task
//!
//! Fires the trigger pin and timestamps the echo pulse into the shared
//! capture. The control loop turns the latest capture into a distance.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{block_for, Duration, Instant, Ticker, Timer};

use bumper_core::config::RangerConfig;

use crate::channels::ECHO;

/// Low time before the trigger pulse
const TRIGGER_SETTLE_US: u64 = 2;

/// Trigger pulse width
const TRIGGER_PULSE_US: u64 = 10;

/// Ranger task
#[embassy_executor::task]
pub async fn ranger_task(
    mut trigger: Output<'static>,
    mut echo: Input<'static>,
    config: RangerConfig,
) {
    info!("Ranger task started");

    let timeout = Duration::from_micros(config.echo_timeout_us as u64);
    let mut ticker = Ticker::every(Duration::from_millis(config.interval_ms as u64));
    let mut timed_out = false;

    loop {
        // Busy-wait: the pulse is shorter than a scheduler round trip
        trigger.set_low();
        block_for(Duration::from_micros(TRIGGER_SETTLE_US));
        trigger.set_high();
        block_for(Duration::from_micros(TRIGGER_PULSE_US));
        trigger.set_low();

        match select(capture_echo(&mut echo), Timer::after(timeout)).await {
            Either::First(()) => {
                if timed_out {
                    debug!("Echo restored");
                    timed_out = false;
                }
            }
            Either::Second(()) => {
                ECHO.timeout();
                if !timed_out {
                    debug!("No echo within {} us", config.echo_timeout_us);
                    timed_out = true;
                }
            }
        }

        ticker.next().await;
    }
}

/// Timestamp one echo pulse
async fn capture_echo(echo: &mut Input<'static>) {
    echo.wait_for_rising_edge().await;
    ECHO.rising(Instant::now().as_micros());

    echo.wait_for_falling_edge().await;
    ECHO.falling(Instant::now().as_micros());
}
