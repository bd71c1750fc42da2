//! Drive requests
//!
//! The network bridge forwards each HTTP request line, for example
//! `GET /drive?ud=120&lr=-40 HTTP/1.1`. `ud` carries the throttle and `lr`
//! the turn. Either may be omitted, in which case the vehicle keeps the
//! previously requested value for that axis.

use bumper_core::state::Command;

use crate::query::{clamp_command, param_value};

/// Path prefix of drive requests
pub const DRIVE_PATH: &str = "/drive";

/// Query parameter carrying the throttle
pub const THROTTLE_PARAM: &str = "ud";

/// Query parameter carrying the turn
pub const TURN_PARAM: &str = "lr";

/// Reply sent for every accepted drive request
pub const DRIVE_OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\nOK\r\n";

/// Errors that can occur when parsing a request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Line is blank
    Empty,
    /// Line is not a request line (e.g. a header)
    NotRequest,
    /// Request targets some other path
    NotDrive,
}

/// A parsed drive request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveRequest {
    /// Clamped throttle, if present
    pub throttle: Option<i32>,
    /// Clamped turn, if present
    pub turn: Option<i32>,
}

impl DriveRequest {
    /// Parse a request line or a bare request target
    ///
    /// Accepts `GET /drive?ud=1&lr=2 HTTP/1.1` as well as `/drive?ud=1&lr=2`.
    pub fn parse(line: &str) -> Result<Self, RequestError> {
        let mut tokens = line.split_ascii_whitespace();
        let first = tokens.next().ok_or(RequestError::Empty)?;

        let target = if first.starts_with('/') {
            first
        } else if !first.is_empty() && first.bytes().all(|b| b.is_ascii_uppercase()) {
            tokens.next().ok_or(RequestError::NotRequest)?
        } else {
            return Err(RequestError::NotRequest);
        };

        if !target.starts_with(DRIVE_PATH) {
            return Err(RequestError::NotDrive);
        }

        let query = target.split_once('?').map(|(_, q)| q).unwrap_or("");

        Ok(Self {
            throttle: param_value(query, THROTTLE_PARAM).map(clamp_command),
            turn: param_value(query, TURN_PARAM).map(clamp_command),
        })
    }

    /// Check if the request carries no values
    pub fn is_empty(&self) -> bool {
        self.throttle.is_none() && self.turn.is_none()
    }

    /// Merge this request into the latest command
    ///
    /// Only axes present in the request are overwritten.
    pub fn apply(&self, command: &mut Command) {
        if let Some(throttle) = self.throttle {
            command.throttle = throttle;
        }
        if let Some(turn) = self.turn {
            command.turn = turn;
        }
    }
}
