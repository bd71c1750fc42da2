//! Obstacle proximity classification
//!
//! Forward motion stops at [`STOP_DISTANCE_CM`] and is only re-permitted
//! beyond [`RESUME_DISTANCE_CM`]. The band in between holds whatever was
//! decided last, so a noisy reading near the threshold does not make the
//! throttle chatter.

/// Forward motion is blocked at or below this distance (cm)
pub const STOP_DISTANCE_CM: f32 = 20.0;

/// Forward motion resumes above this distance (cm)
pub const RESUME_DISTANCE_CM: f32 = 25.0;

/// Where a distance reading falls relative to the stop/resume thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProximityZone {
    /// At or below the stop distance; also any unreadable (NaN) distance
    Blocked,
    /// Above the stop distance, at or below the resume distance
    Hysteresis,
    /// Beyond the resume distance
    Clear,
}

impl ProximityZone {
    /// Classify a distance reading in centimeters
    pub fn classify(distance_cm: f32) -> Self {
        if distance_cm.is_nan() || distance_cm <= STOP_DISTANCE_CM {
            ProximityZone::Blocked
        } else if distance_cm > RESUME_DISTANCE_CM {
            ProximityZone::Clear
        } else {
            ProximityZone::Hysteresis
        }
    }

    /// Check if a stopped vehicle may start moving
    pub fn launch_allowed(&self) -> bool {
        !matches!(self, ProximityZone::Blocked)
    }
}
