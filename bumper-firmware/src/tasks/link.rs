//! Command link task
//!
//! Receives request lines from the network bridge over UART, turns drive
//! requests into operator commands and acknowledges them.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use bumper_core::state::Command;
use bumper_protocol::{DriveRequest, LineBuffer, RequestError, DRIVE_OK_RESPONSE};

use crate::channels::COMMAND;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link task - parses request lines and publishes commands
#[embassy_executor::task]
pub async fn link_task(mut rx: BufferedUartRx, mut tx: BufferedUartTx) {
    info!("Link task started");

    let mut lines: LineBuffer = LineBuffer::new();
    let mut command = Command::STOP;
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            let line = match lines.feed(byte) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Line error: {:?}", e);
                    continue;
                }
            };

            match DriveRequest::parse(&line) {
                Ok(request) => {
                    request.apply(&mut command);
                    debug!("Drive request: ud={}, lr={}", command.throttle, command.turn);
                    COMMAND.signal(command);

                    if let Err(e) = tx.write_all(DRIVE_OK_RESPONSE).await {
                        warn!("UART write error: {:?}", e);
                    }
                }
                Err(RequestError::NotDrive) => {
                    debug!("Ignoring request: {}", line.as_str());
                }
                Err(RequestError::Empty | RequestError::NotRequest) => {
                    // Header lines and blank separators
                }
            }
        }
    }
}
