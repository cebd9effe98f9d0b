#![forbid(unsafe_code)]

//! Plane geometry primitives.
//!
//! Model space is origin-centered with Y growing downward (screen
//! convention). Device space is the host surface's pixel grid with the origin
//! at the top-left corner. A [`CoordinateTransform`] maps one to the other.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A point or displacement on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from an angle (radians, `atan2` convention) and a length.
    #[inline]
    #[must_use]
    pub fn from_polar(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Raw `atan2(y, x)` angle in `(-π, π]`.
    #[inline]
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// SurfaceSize
// ---------------------------------------------------------------------------

/// Dimensions of the host drawing surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl SurfaceSize {
    /// Create a new surface size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[inline]
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Clamp a model-space position into `±half_width × ±half_height`,
    /// each axis independently.
    ///
    /// A degenerate (zero or negative) surface collapses everything onto the
    /// origin instead of panicking.
    #[must_use]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        let hw = self.half_width().max(0.0);
        let hh = self.half_height().max(0.0);
        Vec2::new(pos.x.max(-hw).min(hw), pos.y.max(-hh).min(hh))
    }

    /// Whether a model-space position lies within the clamp bounds.
    #[must_use]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x.abs() <= self.half_width() && pos.y.abs() <= self.half_height()
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle in model space, normalized so `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test (edges count as inside).
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// ---------------------------------------------------------------------------
// Coordinate transforms
// ---------------------------------------------------------------------------

/// Maps device coordinates into model space.
pub trait CoordinateTransform {
    /// Convert a device-space position to model space.
    fn to_model(&self, device: Vec2) -> Vec2;

    /// Inform the transform that the host surface changed size.
    fn set_surface(&mut self, _surface: SurfaceSize) {}
}

/// Puts the model origin at the surface's visual center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CenteredTransform {
    surface: SurfaceSize,
}

impl CenteredTransform {
    #[must_use]
    pub const fn new(surface: SurfaceSize) -> Self {
        Self { surface }
    }

    #[must_use]
    pub const fn surface(&self) -> SurfaceSize {
        self.surface
    }
}

impl CoordinateTransform for CenteredTransform {
    fn to_model(&self, device: Vec2) -> Vec2 {
        Vec2::new(
            device.x - self.surface.half_width(),
            device.y - self.surface.half_height(),
        )
    }

    fn set_surface(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }
}

/// Passes coordinates through unchanged. Useful when the host already
/// delivers model-space positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityTransform;

impl CoordinateTransform for IdentityTransform {
    fn to_model(&self, device: Vec2) -> Vec2 {
        device
    }
}
