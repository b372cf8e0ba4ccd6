//! User-adjustable follow-camera offset.
//!
//! The offset is expressed in the spacecraft's local frame: `lateral` along
//! its right axis, `vertical` along its up axis and `distance` behind it.

use std::f64::consts::PI;

/// Bounds the offset is clamped to.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetBounds {
    pub lateral: f64,
    pub vertical: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for OffsetBounds {
    fn default() -> Self {
        Self {
            lateral: 20.0,
            vertical: 20.0,
            min_distance: 2.0,
            max_distance: 60.0,
        }
    }
}

/// Discrete keyboard adjustments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OffsetAdjustment {
    /// Shift along the right axis by the step (negative = left).
    Lateral(f64),
    /// Shift along the up axis by the step (negative = down).
    Vertical(f64),
    /// Pull back (positive) or move closer (negative).
    Distance(f64),
    /// Rotate around the spacecraft by an angle in radians.
    Rotate(f64),
    /// Swap between above and below the craft.
    FlipVertical,
    /// Jump to the next preset.
    NextPreset,
    /// Back to the default offset.
    Reset,
}

/// Follow offset in the spacecraft frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraOffset {
    pub lateral: f64,
    pub vertical: f64,
    pub distance: f64,
    preset: usize,
}

/// Offset presets cycled with the preset key: chase, close, high, side.
pub const OFFSET_PRESETS: [(f64, f64, f64); 4] = [
    (0.0, 2.0, 10.0),
    (0.0, 1.0, 5.0),
    (0.0, 8.0, 14.0),
    (8.0, 2.0, 8.0),
];

/// Largest rotation away from straight behind the craft (75°).
pub const MAX_ROTATION_ANGLE: f64 = 5.0 * PI / 12.0;

impl Default for CameraOffset {
    fn default() -> Self {
        Self::preset(0)
    }
}

impl CameraOffset {
    /// Offset from the preset table (index wraps).
    pub fn preset(index: usize) -> Self {
        let index = index % OFFSET_PRESETS.len();
        let (lateral, vertical, distance) = OFFSET_PRESETS[index];
        Self {
            lateral,
            vertical,
            distance,
            preset: index,
        }
    }

    /// Index of the last preset applied.
    pub fn preset_index(&self) -> usize {
        self.preset
    }

    /// Polar view of the horizontal plane: (radius, angle from straight behind).
    pub fn polar(&self) -> (f64, f64) {
        (self.lateral.hypot(self.distance), self.lateral.atan2(self.distance))
    }

    /// Apply one adjustment, clamping to `bounds`.
    ///
    /// Rotation keeps the horizontal radius; a rotation that would leave the
    /// allowed angle or lateral range is ignored and `false` is returned.
    pub fn apply(&mut self, adjustment: OffsetAdjustment, bounds: &OffsetBounds) -> bool {
        match adjustment {
            OffsetAdjustment::Lateral(step) => {
                self.lateral = (self.lateral + step).clamp(-bounds.lateral, bounds.lateral);
            }
            OffsetAdjustment::Vertical(step) => {
                self.vertical = (self.vertical + step).clamp(-bounds.vertical, bounds.vertical);
            }
            OffsetAdjustment::Distance(step) => {
                self.distance =
                    (self.distance + step).clamp(bounds.min_distance, bounds.max_distance);
            }
            OffsetAdjustment::Rotate(delta) => return self.rotate(delta, bounds),
            OffsetAdjustment::FlipVertical => self.vertical = -self.vertical,
            OffsetAdjustment::NextPreset => *self = Self::preset(self.preset + 1),
            OffsetAdjustment::Reset => *self = Self::default(),
        }
        true
    }

    fn rotate(&mut self, delta: f64, bounds: &OffsetBounds) -> bool {
        let (radius, angle) = self.polar();
        let new_angle = angle + delta;
        if new_angle.abs() > MAX_ROTATION_ANGLE {
            return false;
        }

        let lateral = radius * new_angle.sin();
        let distance = radius * new_angle.cos();
        if lateral.abs() > bounds.lateral || distance < bounds.min_distance {
            return false;
        }

        self.lateral = lateral;
        self.distance = distance;
        true
    }
}
