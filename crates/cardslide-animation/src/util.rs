//! Small numeric helpers shared across the workspace.

/// Clamp `value` into `[min, max]`.
///
/// Non-finite input saturates at the ceiling: a duration computed from a
/// zero-velocity division (infinite or NaN) must land on the maximum.
/// Plain `f32::max`/`f32::min` would drop a NaN to the floor instead.
pub fn clamp(min: f32, value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return max;
    }
    value.max(min).min(max)
}
