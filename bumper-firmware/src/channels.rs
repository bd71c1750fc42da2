//! Inter-task communication channels
//!
//! Defines the statics shared between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use bumper_core::state::Command;
use bumper_drivers::sensor::EchoCapture;

/// Latest operator command (updated by the link task)
///
/// Only the newest command matters; older ones are overwritten.
pub static COMMAND: Signal<CriticalSectionRawMutex, Command> = Signal::new();

/// Echo timestamps (written by the ranger task, read by the control task)
pub static ECHO: EchoCapture = EchoCapture::new();
