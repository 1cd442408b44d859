//! Volume helpers
//!
//! Track volume is linear, 0.0 - 1.0, matching what the device layer accepts.

/// Clamp a volume into 0.0 - 1.0 (NaN becomes 0.0)
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Volume an item should play at under a master multiplier
///
/// Returns `None` for a zero or NaN multiplier: the master volume is treated
/// as unset and items keep their current volume.
pub fn master_scaled(multiplier: f32, track_volume: f32) -> Option<f32> {
    if multiplier == 0.0 || multiplier.is_nan() {
        return None;
    }
    Some(multiplier * track_volume)
}
