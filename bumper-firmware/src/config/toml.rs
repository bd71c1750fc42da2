//! Simple TOML parser for the vehicle configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `vehicle.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs with non-negative integer values (`_` separators allowed)
//! - Comments (# ...)
//!
//! Keys outside a section and unknown keys are rejected.

use bumper_core::config::{
    ControlConfig, DriveConfig, LinkConfig, RangerConfig, SteeringConfig, VehicleConfig,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Unknown key, or key outside a section
    InvalidKey,
    /// Value is not an integer in range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Ranger,
    Drive,
    Steering,
    Control,
    Link,
}

/// Parse TOML configuration into VehicleConfig
///
/// Keys that are not present keep their default value.
pub fn parse_config(input: &str) -> Result<VehicleConfig, ParseError> {
    let mut config = VehicleConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidKey)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse section header like "steering"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "ranger" => Ok(Section::Ranger),
        "drive" => Ok(Section::Drive),
        "steering" => Ok(Section::Steering),
        "control" => Ok(Section::Control),
        "link" => Ok(Section::Link),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a non-negative integer value, allowing `_` digit separators
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let mut acc: u32 = 0;
    let mut digits = 0;

    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }

    T::try_from(acc).map_err(|_| ParseError::InvalidValue)
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut VehicleConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Ranger => {
            let r: &mut RangerConfig = &mut config.ranger;
            match key {
                "interval_ms" => r.interval_ms = parse_int(value)?,
                "echo_timeout_us" => r.echo_timeout_us = parse_int(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Drive => {
            let d: &mut DriveConfig = &mut config.drive;
            match key {
                "pwm_top" => d.pwm_top = parse_int(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Steering => {
            let s: &mut SteeringConfig = &mut config.steering;
            match key {
                "max_offset_deg" => s.max_offset_deg = parse_int(value)?,
                "min_pulse_us" => s.min_pulse_us = parse_int(value)?,
                "max_pulse_us" => s.max_pulse_us = parse_int(value)?,
                "period_us" => s.period_us = parse_int(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Control => {
            let c: &mut ControlConfig = &mut config.control;
            match key {
                "tick_ms" => c.tick_ms = parse_int(value)?,
                "watchdog_ms" => c.watchdog_ms = parse_int(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Link => {
            let l: &mut LinkConfig = &mut config.link;
            match key {
                "baudrate" => l.baudrate = parse_int(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Root => return Err(ParseError::InvalidKey),
    }

    Ok(())
}
