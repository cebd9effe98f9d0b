#![forbid(unsafe_code)]

//! Angle arithmetic on the screen plane.
//!
//! Angles come from `atan2(y, x)` with Y pointing down, then normalized into
//! `(-2π, 0]` so they decrease monotonically as a ray sweeps clockwise on
//! screen from the positive X axis.

use std::f64::consts::TAU;

use wv_core::Vec2;

/// Raw `atan2` angle of a position, in `(-π, π]`.
#[inline]
#[must_use]
pub fn angle_of(p: Vec2) -> f64 {
    p.angle()
}

/// Map any finite angle into `(-2π, 0]`.
///
/// Values already in range come back unchanged, so the function is
/// idempotent. Zero maps to zero.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if angle <= 0.0 && angle > -TAU {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU) - TAU;
    // rem_euclid can round up to exactly TAU.
    if wrapped <= -TAU || wrapped >= 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clockwise span from `start` to `end`.
///
/// `start - end` when `start > end`, otherwise `2π - (end - start)` to cross
/// the `0 / -2π` seam. Callers pass edges in rotational order.
#[inline]
#[must_use]
pub fn delta_angle(start: f64, end: f64) -> f64 {
    if start > end {
        start - end
    } else {
        TAU - (end - start)
    }
}

/// Round half up, toward positive infinity.
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Whole-degree display form of an angle in radians.
#[must_use]
pub fn display_degrees(radians: f64) -> i32 {
    round_half_up(radians.to_degrees()) as i32
}

/// Whether a normalized angle lies on the inside of the wedge whose edges are
/// `near` and `real_far`.
///
/// When the wedge straddles the seam (`near <= real_far`), inside is the
/// complement of `[near, real_far]`.
#[must_use]
pub fn is_within_wedge(angle: f64, near: f64, real_far: f64) -> bool {
    if near > real_far {
        angle <= near && angle >= real_far
    } else {
        !(angle <= real_far && angle >= near)
    }
}

/// A position in polar form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Raw `atan2` angle.
    pub angle: f64,
    /// Distance from the origin.
    pub length: f64,
}

impl Polar {
    #[must_use]
    pub fn of(p: Vec2) -> Self {
        Self {
            angle: angle_of(p),
            length: p.length(),
        }
    }

    #[must_use]
    pub fn to_vec(self) -> Vec2 {
        Vec2::from_polar(self.angle, self.length)
    }
}
