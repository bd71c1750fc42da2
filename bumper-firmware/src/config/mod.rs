//! Configuration loading and parsing
//!
//! The vehicle configuration is the `vehicle.toml` embedded at build time,
//! parsed by a custom no_std parser.

pub mod toml;

use defmt::*;

use bumper_core::config::VehicleConfig;

pub use toml::{parse_config, ParseError};

/// Embedded configuration (compiled into firmware)
/// Edit vehicle.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../vehicle.toml");

/// Load the embedded configuration
///
/// Falls back to the built-in defaults if the file fails to parse or
/// holds values the firmware cannot run with.
pub fn load_config() -> VehicleConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // build.rs checks the file, so this only happens on a parser mismatch
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            return VehicleConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid embedded config: {:?}", e);
        error!("Using default configuration");
        return VehicleConfig::default();
    }

    log_config_summary(&config);
    config
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &VehicleConfig) {
    info!("Configuration loaded successfully");
    debug!(
        "  control: tick {} ms, watchdog {} ms",
        config.control.tick_ms, config.control.watchdog_ms
    );
    debug!(
        "  ranger: every {} ms, timeout {} us",
        config.ranger.interval_ms, config.ranger.echo_timeout_us
    );
    debug!(
        "  steering: ±{}°, {}-{} us pulse",
        config.steering.max_offset_deg, config.steering.min_pulse_us, config.steering.max_pulse_us
    );
    debug!("  link: {} baud", config.link.baudrate);
}
