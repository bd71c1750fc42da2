//! Drive Command Protocol
//!
//! This crate decodes the operator's drive commands. A phone app issues
//! plain HTTP requests to the vehicle's network bridge, which forwards each
//! request line to the controller over UART:
//!
//! ```text
//! GET /drive?ud=<throttle>&lr=<turn> HTTP/1.1
//! ```
//!
//! Both values are integers clamped to -255..=255 before they reach the
//! state machine. Every accepted request is answered with a fixed
//! `200 OK` reply.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod query;
pub mod request;

pub use line::{LineBuffer, LineError, MAX_LINE_LEN};
pub use query::{clamp_command, param_value, parse_int, MAX_COMMAND};
pub use request::{DriveRequest, RequestError, DRIVE_OK_RESPONSE};
