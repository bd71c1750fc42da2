//! Line assembly for the serial command link
//!
//! Bytes arrive in arbitrary chunks; request lines end with `\n` and an
//! optional preceding `\r`.

use heapless::{String, Vec};

/// Longest request line kept by the firmware
pub const MAX_LINE_LEN: usize = 128;

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer and was discarded
    Overflow,
    /// Line is not valid UTF-8
    InvalidUtf8,
}

/// Accumulates bytes into complete lines
#[derive(Debug, Clone, Default)]
pub struct LineBuffer<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    /// A `\r` was seen and not yet stored; it is dropped if `\n` follows
    pending_cr: bool,
    overflowed: bool,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty line buffer
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            pending_cr: false,
            overflowed: false,
        }
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending_cr = false;
        self.overflowed = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` at the end of a line (without terminator),
    /// `Ok(None)` when more bytes are needed. An overlong line is dropped
    /// as a whole and reported once its terminator arrives.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<N>>, LineError> {
        match byte {
            b'\n' => {
                let overflowed = self.overflowed;
                let bytes = core::mem::take(&mut self.buffer);
                self.reset();

                if overflowed {
                    return Err(LineError::Overflow);
                }

                String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|_| LineError::InvalidUtf8)
            }
            b'\r' => {
                // A bare `\r` followed by another one is line data
                if self.pending_cr {
                    self.push(b'\r');
                }
                self.pending_cr = true;
                Ok(None)
            }
            _ => {
                if self.pending_cr {
                    self.pending_cr = false;
                    self.push(b'\r');
                }
                self.push(byte);
                Ok(None)
            }
        }
    }

    /// Store a byte, marking the line overflowed once it no longer fits
    fn push(&mut self, byte: u8) {
        if self.overflowed {
            return;
        }
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
            self.buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all<const N: usize>(
        buffer: &mut LineBuffer<N>,
        bytes: &[u8],
    ) -> Option<Result<String<N>, LineError>> {
        for &byte in bytes {
            match buffer.feed(byte) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    #[test]
    fn test_crlf_line() {
        let mut buffer: LineBuffer = LineBuffer::new();
        let line = feed_all(&mut buffer, b"GET /drive?ud=5 HTTP/1.1\r\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "GET /drive?ud=5 HTTP/1.1");
    }

    #[test]
    fn test_lf_line_and_partial_input() {
        let mut buffer: LineBuffer = LineBuffer::new();
        assert!(feed_all(&mut buffer, b"/drive?").is_none());
        let line = feed_all(&mut buffer, b"lr=3\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "/drive?lr=3");
    }

    #[test]
    fn test_empty_line() {
        let mut buffer: LineBuffer = LineBuffer::new();
        let line = feed_all(&mut buffer, b"\r\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "");
    }

    #[test]
    fn test_overflow_discards_line() {
        let mut buffer: LineBuffer<8> = LineBuffer::new();
        let result = feed_all(&mut buffer, b"0123456789\n");
        assert_eq!(result, Some(Err(LineError::Overflow)));

        // Next line is unaffected
        let line = feed_all(&mut buffer, b"ok\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "ok");
    }

    #[test]
    fn test_full_line_with_crlf() {
        let mut buffer: LineBuffer<8> = LineBuffer::new();
        let line = feed_all(&mut buffer, b"01234567\r\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "01234567");

        let line = feed_all(&mut buffer, b"01234567\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "01234567");

        let result = feed_all(&mut buffer, b"012345678\r\n");
        assert_eq!(result, Some(Err(LineError::Overflow)));
    }

    #[test]
    fn test_inner_cr_is_kept() {
        let mut buffer: LineBuffer = LineBuffer::new();
        let line = feed_all(&mut buffer, b"a\rb\r\r\n");
        assert_eq!(line.unwrap().unwrap().as_str(), "a\rb\r");
    }

    #[test]
    fn test_invalid_utf8() {
        let mut buffer: LineBuffer = LineBuffer::new();
        let result = feed_all(&mut buffer, &[0xFF, 0xFE, b'\n']);
        assert_eq!(result, Some(Err(LineError::InvalidUtf8)));
    }
}
