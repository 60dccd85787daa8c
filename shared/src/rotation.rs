//! Wheel geometry and landing math.
//!
//! Angles are in degrees, measured clockwise in screen space with 0° at
//! 3 o'clock. Wedges are laid out from the pointer at −90° (12 o'clock):
//! wedge `i` spans `[i * a - 90, (i + 1) * a - 90)` where `a = 360 / count`.
//! A wheel rotation `θ` moves a wedge drawn at `φ` to `φ + θ`.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{FULL_TURN, POINTER_ANGLE};
use crate::error::RotationError;

pub fn segment_angle(segment_count: usize) -> f64 {
    FULL_TURN / segment_count as f64
}

fn check_segment(index: usize, segment_count: usize) -> Result<(), RotationError> {
    if segment_count == 0 {
        return Err(RotationError::NoSegments);
    }
    if index >= segment_count {
        return Err(RotationError::IndexOutOfRange {
            index,
            count: segment_count,
        });
    }
    Ok(())
}

/// Angle of the centre of wedge `index` before any rotation.
pub fn segment_center_angle(index: usize, segment_count: usize) -> Result<f64, RotationError> {
    check_segment(index, segment_count)?;
    let angle = segment_angle(segment_count);
    Ok(index as f64 * angle + angle / 2.0 + POINTER_ANGLE)
}

/// Smallest rotation (possibly negative) that puts wedge `index` under the pointer.
pub fn target_rotation(index: usize, segment_count: usize) -> Result<f64, RotationError> {
    Ok(POINTER_ANGLE - segment_center_angle(index, segment_count)?)
}

/// Landing rotation with `extra_spins` full turns added for effect.
pub fn plan_rotation(
    index: usize,
    segment_count: usize,
    extra_spins: u32,
) -> Result<f64, RotationError> {
    Ok(target_rotation(index, segment_count)? + extra_spins as f64 * FULL_TURN)
}

/// Same as [`plan_rotation`], drawing the number of extra turns from `spins`.
pub fn plan_rotation_with_rng<R>(
    index: usize,
    segment_count: usize,
    spins: RangeInclusive<u32>,
    rng: &mut R,
) -> Result<f64, RotationError>
where
    R: Rng + ?Sized,
{
    if spins.is_empty() {
        return Err(RotationError::EmptySpinRange {
            min: *spins.start(),
            max: *spins.end(),
        });
    }
    let extra_spins = rng.gen_range(spins);
    plan_rotation(index, segment_count, extra_spins)
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(FULL_TURN)
}

/// Index of the wedge sitting under the pointer once the wheel has turned by `rotation`.
pub fn segment_under_pointer(rotation: f64, segment_count: usize) -> Option<usize> {
    if segment_count == 0 || !rotation.is_finite() {
        return None;
    }
    let offset = normalize_degrees(-rotation);
    let index = (offset / segment_angle(segment_count)).floor() as usize;
    Some(index.min(segment_count - 1))
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WedgeArc {
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
}

pub fn wedge_arc(index: usize, segment_count: usize) -> Result<WedgeArc, RotationError> {
    check_segment(index, segment_count)?;
    let angle = segment_angle(segment_count);
    Ok(WedgeArc {
        start_angle: index as f64 * angle + POINTER_ANGLE,
        end_angle: (index + 1) as f64 * angle + POINTER_ANGLE,
        large_arc: angle > 180.0,
    })
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub rotation: f64, // text reads outward from the hub
}

pub fn label_anchor(
    index: usize,
    segment_count: usize,
    center: (f64, f64),
    radius: f64,
) -> Result<LabelAnchor, RotationError> {
    let angle = segment_center_angle(index, segment_count)?;
    let radians = angle * PI / 180.0;
    Ok(LabelAnchor {
        x: center.0 + radius * radians.cos(),
        y: center.1 + radius * radians.sin(),
        rotation: angle + 90.0,
    })
}

// Ease-out: 1 - (1-t)^4
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// One eased transition of the wheel from `start` to `end`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RotationPlan {
    pub start: f64,
    pub end: f64,
    pub duration_ms: u32,
}

impl RotationPlan {
    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms == 0 {
            return self.end;
        }
        let progress = elapsed_ms / self.duration_ms as f64;
        self.start + (self.end - self.start) * ease_out(progress)
    }

    pub fn is_settled(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms as f64
    }

    pub fn resting_angle(&self) -> f64 {
        normalize_degrees(self.end)
    }
}
