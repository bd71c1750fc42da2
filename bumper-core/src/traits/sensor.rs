//! Distance sensor trait

/// Obstacle distance source
///
/// Implementations resolve raw measurements into a single scalar before the
/// control loop sees it. When nothing is in range they report
/// [`SENTINEL_DISTANCE_CM`](crate::state::SENTINEL_DISTANCE_CM).
pub trait RangeSensor {
    /// Current distance to the nearest obstacle in centimeters (>= 0)
    fn distance_cm(&mut self) -> f32;
}
