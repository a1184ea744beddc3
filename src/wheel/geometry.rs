//! Segment layout and spin target geometry.
//!
//! Angles are in degrees. Segment `i` of `n` spans `[i*360/n, (i+1)*360/n)` in
//! wheel coordinates; a point at wheel angle `a` is drawn at screen angle
//! `a + rotation`. The pointer is fixed at [`POINTER_OFFSET`] (top of the
//! circle).

use crate::types::{OptionId, WheelOption};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const FULL_TURN: f64 = 360.0;

/// Screen angle of the fixed pointer
pub const POINTER_OFFSET: f64 = 270.0;

/// Share of a segment's width the pointer may land in (centered)
pub const LANDING_ZONE: f64 = 0.8;

/// One drawable slice of the wheel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: OptionId,
    pub label: String,
    pub color: String,
    pub text_color: String,
    pub start: f64,
    pub end: f64,
    pub label_angle: f64,
}

/// Where a spin should stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTarget {
    pub full_turns: u32,
    /// Rotation that puts the start of the winning segment exactly under the pointer
    pub aligned: f64,
    /// `aligned` shifted into the winning segment's landing zone
    pub target: f64,
}

pub fn segment_angle(count: usize) -> f64 {
    FULL_TURN / count as f64
}

pub fn layout(options: &[WheelOption]) -> Vec<Segment> {
    if options.is_empty() {
        return Vec::new();
    }
    let width = segment_angle(options.len());

    options
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let start = i as f64 * width;
            Segment {
                id: o.id.clone(),
                label: o.label.clone(),
                color: o.color.clone(),
                text_color: o.text_color.clone(),
                start,
                end: start + width,
                label_angle: start + width / 2.0,
            }
        })
        .collect()
}

/// Rotation in `[0, 360)` satisfying `(rotation + index*width) mod 360 == POINTER_OFFSET`
pub fn alignment_rotation(index: usize, count: usize) -> f64 {
    (POINTER_OFFSET - index as f64 * segment_angle(count)).rem_euclid(FULL_TURN)
}

/// Index of the segment under the pointer at `rotation`
pub fn segment_under_pointer(rotation: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let wheel_angle = (POINTER_OFFSET - rotation).rem_euclid(FULL_TURN);
    let index = (wheel_angle / segment_angle(count)).floor() as usize;
    Some(index.min(count - 1))
}

/// Compute the absolute rotation a spin should end on.
///
/// The result is always ahead of `current`: the wheel turns forward by
/// `full_turns` whole turns plus whatever is needed to reach the winning
/// segment, then backs off into the segment by a random amount within
/// [`LANDING_ZONE`]. `min_turns` must be at least 1.
pub fn plan_rotation<R: Rng>(
    current: f64,
    index: usize,
    count: usize,
    min_turns: u32,
    max_turns: u32,
    rng: &mut R,
) -> RotationTarget {
    let width = segment_angle(count);
    let full_turns = rng.random_range(min_turns..=max_turns);

    let forward = (alignment_rotation(index, count) - current).rem_euclid(FULL_TURN);
    let aligned = current + f64::from(full_turns) * FULL_TURN + forward;

    // Pointer sits at wheel angle `index*width - jitter`, so a negative jitter
    // moves it into the segment.
    let spread: f64 = rng.random_range(-0.5..=0.5);
    let jitter = -width / 2.0 + spread * width * LANDING_ZONE;

    RotationTarget {
        full_turns,
        aligned,
        target: aligned + jitter,
    }
}
