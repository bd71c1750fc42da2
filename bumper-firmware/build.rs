//! Build script for bumper-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates vehicle.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section
const SECTIONS: &[(&str, &[&str])] = &[
    ("ranger", &["interval_ms", "echo_timeout_us"]),
    ("drive", &["pwm_top"]),
    (
        "steering",
        &["max_offset_deg", "min_pulse_us", "max_pulse_us", "period_us"],
    ),
    ("control", &["tick_ms", "watchdog_ms"]),
    ("link", &["baudrate"]),
];

/// Defaults used when a key is omitted
const DEFAULT_TICK_MS: i64 = 10;
const DEFAULT_WATCHDOG_MS: i64 = 5000;
const DEFAULT_MIN_PULSE_US: i64 = 1000;
const DEFAULT_MAX_PULSE_US: i64 = 2000;
const DEFAULT_PERIOD_US: i64 = 20_000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate vehicle.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=vehicle.toml");

    let config_path = Path::new("vehicle.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: vehicle.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds vehicle.toml as its configuration.          ║\n\
            ║  Please create one in the bumper-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read vehicle.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in vehicle.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    report("Unknown sections or keys", validate_layout(&config));
    report("Invalid values", validate_values(&config));

    println!("cargo:warning=vehicle.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors, if there are any
fn report(title: &str, errors: Vec<String>) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        format!("{} in vehicle.toml", title),
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Every table must be a known section holding known integer keys
fn validate_layout(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return errors,
    };

    for (name, section) in root {
        let keys = match SECTIONS.iter().find(|(s, _)| s == name) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("Unknown section [{}]", name));
                continue;
            }
        };

        let section = match section.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for (key, value) in section {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            } else if !matches!(value, toml::Value::Integer(v) if *v >= 0) {
                errors.push(format!("[{}] {} must be a non-negative integer", name, key));
            }
        }
    }

    errors
}

/// Cross-field checks the firmware relies on at runtime
fn validate_values(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let get = |section: &str, key: &str| -> Option<i64> {
        config
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_integer())
    };

    let tick_ms = get("control", "tick_ms").unwrap_or(DEFAULT_TICK_MS);
    if !(1..=100).contains(&tick_ms) {
        errors.push("[control] tick_ms must be 1-100".to_string());
    }

    let watchdog_ms = get("control", "watchdog_ms").unwrap_or(DEFAULT_WATCHDOG_MS);
    if watchdog_ms <= tick_ms || watchdog_ms > 8000 {
        errors.push("[control] watchdog_ms must exceed tick_ms and be at most 8000".to_string());
    }

    if let Some(offset) = get("steering", "max_offset_deg") {
        if offset > 90 {
            errors.push("[steering] max_offset_deg must be 0-90".to_string());
        }
    }

    let min_pulse = get("steering", "min_pulse_us").unwrap_or(DEFAULT_MIN_PULSE_US);
    let max_pulse = get("steering", "max_pulse_us").unwrap_or(DEFAULT_MAX_PULSE_US);
    let period = get("steering", "period_us").unwrap_or(DEFAULT_PERIOD_US);
    if min_pulse >= max_pulse {
        errors.push("[steering] min_pulse_us must be below max_pulse_us".to_string());
    }
    if max_pulse > period || period > u16::MAX as i64 {
        errors.push("[steering] period_us must hold max_pulse_us and fit 16 bits".to_string());
    }

    if let Some(top) = get("drive", "pwm_top") {
        if top > u16::MAX as i64 {
            errors.push("[drive] pwm_top must fit 16 bits".to_string());
        }
    }

    if get("ranger", "echo_timeout_us") == Some(0) {
        errors.push("[ranger] echo_timeout_us must be non-zero".to_string());
    }

    errors
}
