//! Bumper - RC Vehicle Firmware
//!
//! Main firmware binary for the RP2040-based vehicle controller. Drive
//! commands arrive over UART from the network bridge; an ultrasonic ranger
//! keeps the car from driving forward into obstacles.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bumper_core::config::SteeringConfig;
use bumper_drivers::motor::HBridgeDrive;
use bumper_drivers::servo::SteeringServo;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// System clock feeding the PWM slices
const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Servo PWM clock divider (125 MHz / 64 = 1.953 MHz)
const SERVO_PWM_DIVIDER: u8 = 64;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bumper firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // UART0 to the network bridge (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.link.baudrate);

    // Ultrasonic ranger (GPIO7 trigger, GPIO2 echo)
    let trigger = Output::new(p.PIN_7, Level::Low);
    let echo = Input::new(p.PIN_2, Pull::None);

    // Drive motor: direction on GPIO8/GPIO12, speed PWM on GPIO10 (slice 5 A)
    let forward = Output::new(p.PIN_8, Level::Low);
    let back = Output::new(p.PIN_12, Level::Low);

    let mut drive_pwm_config = PwmConfig::default();
    drive_pwm_config.top = config.drive.pwm_top;
    drive_pwm_config.compare_a = 0;
    let (speed, _) = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, drive_pwm_config).split();
    let speed = unwrap!(speed);

    let drive = unwrap!(HBridgeDrive::new(forward, back, speed));
    info!("Drive motor initialized");

    // Steering servo on GPIO14 (slice 7 A)
    let mut servo_pwm_config = PwmConfig::default();
    servo_pwm_config.divider = SERVO_PWM_DIVIDER.into();
    servo_pwm_config.top = servo_top(&config.steering);
    servo_pwm_config.compare_a = 0;
    let (servo, _) = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, servo_pwm_config).split();
    let servo = unwrap!(servo);

    let steering = unwrap!(SteeringServo::new(servo, config.steering));
    info!("Steering servo initialized");

    // Start the watchdog last so bring-up time does not count against it
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_millis(config.control.watchdog_ms as u64));
    info!("Watchdog started ({} ms)", config.control.watchdog_ms);

    spawner
        .spawn(tasks::ranger_task(trigger, echo, config.ranger))
        .unwrap();
    spawner.spawn(tasks::link_task(rx, tx)).unwrap();
    spawner
        .spawn(tasks::control_task(drive, steering, watchdog, config.control))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// PWM counter top for one servo frame
fn servo_top(steering: &SteeringConfig) -> u16 {
    let ticks_per_ms = SYS_CLOCK_HZ / SERVO_PWM_DIVIDER as u32 / 1000;
    let ticks = ticks_per_ms * steering.period_us as u32 / 1000;
    ticks.saturating_sub(1).min(u16::MAX as u32) as u16
}
