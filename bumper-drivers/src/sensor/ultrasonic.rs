//! HC-SR04 ultrasonic ranger
//!
//! The echo pin goes high when the burst leaves the transducer and low when
//! the reflection returns. Edge timestamps are written by the capture side
//! (an edge interrupt or an async edge wait) into an [`EchoCapture`] and
//! resolved into a distance by the control loop through [`UltrasonicRanger`].
//!
//! # Usage
//!
//! ```ignore
//! static ECHO: EchoCapture = EchoCapture::new();
//!
//! // Capture side
//! ECHO.rising(now_us());
//! ECHO.falling(now_us());
//!
//! // Control loop
//! let mut ranger = UltrasonicRanger::new(&ECHO);
//! let distance = ranger.distance_cm();
//! ```

use core::cell::Cell;

use bumper_core::state::SENTINEL_DISTANCE_CM;
use bumper_core::traits::RangeSensor;
use critical_section::Mutex;

/// Speed of sound at room temperature (cm/µs)
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// A completed echo pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Echo {
    /// Rising edge timestamp (µs)
    pub start_us: u64,
    /// Falling edge timestamp (µs)
    pub end_us: u64,
}

impl Echo {
    /// Round-trip time of the pulse
    ///
    /// An end before the start means no reflection was seen, reported as 0.
    pub fn duration_us(&self) -> u64 {
        self.end_us.saturating_sub(self.start_us)
    }

    /// Convert the pulse into a one-way distance
    ///
    /// A zero-length pulse means nothing was in range.
    pub fn distance_cm(&self) -> f32 {
        match self.duration_us() {
            0 => SENTINEL_DISTANCE_CM,
            duration => duration as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EchoSlot {
    echo: Echo,
    done: bool,
}

/// Echo timestamps shared between the capture side and the control loop
///
/// Exactly one writer and one reader. Both sides go through a critical
/// section, so the reader never sees a start from one pulse paired with
/// the end of another.
pub struct EchoCapture {
    slot: Mutex<Cell<EchoSlot>>,
}

impl Default for EchoCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(EchoSlot {
                echo: Echo {
                    start_us: 0,
                    end_us: 0,
                },
                done: false,
            })),
        }
    }

    /// Record the rising edge of the echo pin
    pub fn rising(&self, now_us: u64) {
        critical_section::with(|cs| {
            let cell = self.slot.borrow(cs);
            let mut slot = cell.get();
            slot.echo.start_us = now_us;
            cell.set(slot);
        });
    }

    /// Record the falling edge and mark the echo complete
    pub fn falling(&self, now_us: u64) {
        critical_section::with(|cs| {
            let cell = self.slot.borrow(cs);
            let mut slot = cell.get();
            slot.echo.end_us = now_us;
            slot.done = true;
            cell.set(slot);
        });
    }

    /// Record that no echo returned in time
    pub fn timeout(&self) {
        critical_section::with(|cs| {
            self.slot.borrow(cs).set(EchoSlot {
                echo: Echo::default(),
                done: true,
            });
        });
    }

    /// Take the completed echo, if any
    pub fn take(&self) -> Option<Echo> {
        critical_section::with(|cs| {
            let cell = self.slot.borrow(cs);
            let slot = cell.get();
            if !slot.done {
                return None;
            }
            cell.set(EchoSlot {
                done: false,
                ..slot
            });
            Some(slot.echo)
        })
    }
}

/// Distance adapter over an [`EchoCapture`]
///
/// Keeps the last resolved distance; reads between completed echoes
/// return that value unchanged.
pub struct UltrasonicRanger<'a> {
    capture: &'a EchoCapture,
    distance_cm: f32,
}

impl<'a> UltrasonicRanger<'a> {
    /// Create a ranger reporting the sentinel until the first echo
    pub fn new(capture: &'a EchoCapture) -> Self {
        Self {
            capture,
            distance_cm: SENTINEL_DISTANCE_CM,
        }
    }

    /// Consume a completed echo and return the current distance
    pub fn poll(&mut self) -> f32 {
        if let Some(echo) = self.capture.take() {
            self.distance_cm = echo.distance_cm();
        }
        self.distance_cm
    }

    /// Last resolved distance without polling
    pub fn last_distance_cm(&self) -> f32 {
        self.distance_cm
    }
}

impl RangeSensor for UltrasonicRanger<'_> {
    fn distance_cm(&mut self) -> f32 {
        self.poll()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        a - b <= 1e-3 && b - a <= 1e-3
    }

    #[test]
    fn test_echo_distance() {
        // 1166 µs round trip ≈ 20 cm
        let echo = Echo {
            start_us: 1000,
            end_us: 2166,
        };
        assert_eq!(echo.duration_us(), 1166);
        assert!(close(echo.distance_cm(), 19.9969));
    }

    #[test]
    fn test_zero_duration_is_sentinel() {
        let echo = Echo {
            start_us: 500,
            end_us: 500,
        };
        assert_eq!(echo.distance_cm(), SENTINEL_DISTANCE_CM);
    }

    #[test]
    fn test_end_before_start_is_sentinel() {
        let echo = Echo {
            start_us: 900,
            end_us: 100,
        };
        assert_eq!(echo.duration_us(), 0);
        assert_eq!(echo.distance_cm(), SENTINEL_DISTANCE_CM);
    }

    #[test]
    fn test_take_requires_falling_edge() {
        let capture = EchoCapture::new();
        assert_eq!(capture.take(), None);

        capture.rising(10);
        assert_eq!(capture.take(), None);

        capture.falling(70);
        assert_eq!(
            capture.take(),
            Some(Echo {
                start_us: 10,
                end_us: 70
            })
        );

        // Consumed
        assert_eq!(capture.take(), None);
    }

    #[test]
    fn test_timeout_reports_far() {
        let capture = EchoCapture::new();
        capture.rising(10);
        capture.timeout();

        let echo = capture.take().unwrap();
        assert_eq!(echo.distance_cm(), SENTINEL_DISTANCE_CM);
    }

    #[test]
    fn test_ranger_starts_at_sentinel() {
        let capture = EchoCapture::new();
        let mut ranger = UltrasonicRanger::new(&capture);
        assert_eq!(ranger.distance_cm(), SENTINEL_DISTANCE_CM);
    }

    #[test]
    fn test_ranger_holds_last_reading() {
        let capture = EchoCapture::new();
        let mut ranger = UltrasonicRanger::new(&capture);

        capture.rising(0);
        capture.falling(2915); // ≈ 50 cm
        let first = ranger.distance_cm();
        assert!(close(first, 49.99225));

        // No new echo: same value
        assert_eq!(ranger.distance_cm(), first);
        assert_eq!(ranger.last_distance_cm(), first);

        capture.timeout();
        assert_eq!(ranger.distance_cm(), SENTINEL_DISTANCE_CM);
    }

    #[test]
    fn test_shared_static_capture() {
        static CAPTURE: EchoCapture = EchoCapture::new();

        let writer = std::thread::spawn(|| {
            CAPTURE.rising(100);
            CAPTURE.falling(683); // ≈ 10 cm
        });
        writer.join().unwrap();

        let mut ranger = UltrasonicRanger::new(&CAPTURE);
        assert!(close(ranger.distance_cm(), 9.99845));
    }
}
