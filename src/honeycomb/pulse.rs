//! Sine-driven glow modulation for the "firefly" cells.

/// Angular speed of the pulse, in radians per frame.
pub const DEFAULT_ANGULAR_SPEED: f32 = 0.02;

/// Opacity range on the 0-255 scale.
pub const ALPHA_RANGE: (f32, f32) = (50.0, 200.0);

/// Stroke width range in pixels.
pub const WIDTH_RANGE: (f32, f32) = (1.0, 2.5);

/// Linearly re-maps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
/// Not clamped.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Raw pulse in `[-1, 1]` for a cell at the given frame.
///
/// The angle is accumulated in f64: frame counts past 2^24 lose whole frames
/// in f32.
pub fn pulse(frame_count: f64, angular_speed: f32, phase_offset: f32) -> f32 {
    (frame_count * f64::from(angular_speed) + f64::from(phase_offset)).sin() as f32
}

/// Glow stroke parameters derived from a pulse value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStyle {
    /// Opacity on the 0-255 scale.
    pub alpha: f32,
    pub width: f32,
}

impl GlowStyle {
    pub fn from_pulse(pulse: f32) -> Self {
        Self {
            alpha: map_range(pulse, -1.0, 1.0, ALPHA_RANGE.0, ALPHA_RANGE.1),
            width: map_range(pulse, -1.0, 1.0, WIDTH_RANGE.0, WIDTH_RANGE.1),
        }
    }

    pub fn at(frame_count: f64, angular_speed: f32, phase_offset: f32) -> Self {
        Self::from_pulse(pulse(frame_count, angular_speed, phase_offset))
    }

    /// Opacity as a `0.0..=1.0` alpha channel.
    pub fn alpha_unit(&self) -> f32 {
        self.alpha / 255.0
    }
}
