#![forbid(unsafe_code)]

//! Subject-point generators.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wv_core::{SurfaceSize, Vec2};
use wv_model::{Point, PointId, PointRole};

use crate::config::GeneratorKind;

/// First id handed to generated points is `SUBJECT_ID_BASE + 1`.
pub const SUBJECT_ID_BASE: u32 = 1000;
pub const SUBJECT_BASE_RADIUS: f64 = 7.0;
pub const SUBJECT_HOVER_RADIUS: f64 = 11.0;

/// Produces a fresh batch of subject points.
pub trait TreeGenerator {
    /// Short display name.
    fn name(&self) -> &'static str;

    /// One-line description for tooltips.
    fn description(&self) -> &'static str;

    /// Generate `count` subject points for a surface of the given size.
    fn generate(&mut self, count: usize, surface: SurfaceSize) -> Vec<Point>;
}

fn subject(index: usize, position: Vec2) -> Point {
    let id = SUBJECT_ID_BASE.saturating_add(u32::try_from(index + 1).unwrap_or(u32::MAX));
    Point::new(PointId(id), position, PointRole::Subject)
        .with_radii(SUBJECT_BASE_RADIUS, SUBJECT_HOVER_RADIUS)
}

// ---------------------------------------------------------------------------
// Circle
// ---------------------------------------------------------------------------

/// Evenly spaced points on a circle around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGenerator {
    pub radius: f64,
}

impl Default for CircleGenerator {
    fn default() -> Self {
        Self { radius: 150.0 }
    }
}

impl TreeGenerator for CircleGenerator {
    fn name(&self) -> &'static str {
        "Circle"
    }

    fn description(&self) -> &'static str {
        "Generates trees evenly spaced on a circle."
    }

    fn generate(&mut self, count: usize, _surface: SurfaceSize) -> Vec<Point> {
        (0..count)
            .map(|i| {
                let angle = TAU * i as f64 / count as f64;
                subject(i, Vec2::from_polar(angle, self.radius))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Uniformly random points over the whole surface.
#[derive(Debug, Clone)]
pub struct DispatchGenerator {
    rng: SmallRng,
}

impl DispatchGenerator {
    /// Deterministic sequence from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl TreeGenerator for DispatchGenerator {
    fn name(&self) -> &'static str {
        "Dispatch"
    }

    fn description(&self) -> &'static str {
        "Generates trees with a completely random distribution."
    }

    fn generate(&mut self, count: usize, surface: SurfaceSize) -> Vec<Point> {
        let hw = surface.half_width();
        let hh = surface.half_height();
        (0..count)
            .map(|i| {
                let x = (self.rng.random::<f64>() * 2.0 - 1.0) * hw;
                let y = (self.rng.random::<f64>() * 2.0 - 1.0) * hh;
                subject(i, Vec2::new(x, y))
            })
            .collect()
    }
}

/// Build the generator selected by `kind`.
#[must_use]
pub fn generator_for(kind: GeneratorKind, seed: Option<u64>) -> Box<dyn TreeGenerator + Send> {
    match kind {
        GeneratorKind::Circle => Box::new(CircleGenerator::default()),
        GeneratorKind::Dispatch => Box::new(match seed {
            Some(seed) => DispatchGenerator::seeded(seed),
            None => DispatchGenerator::from_entropy(),
        }),
    }
}
