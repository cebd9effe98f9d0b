#![forbid(unsafe_code)]

//! Scene configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! tree_count = 45
//! generator = "circle"
//! emphasis = "outer"
//!
//! [surface]
//! width = 1024.0
//! height = 768.0
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wv_core::{GestureConfig, SurfaceSize};

use crate::error::ConfigError;

/// Allowed subject-point counts.
pub const TREE_COUNT_RANGE: RangeInclusive<u32> = 1..=90;

/// Allowed emphasis overlay transparency.
pub const EMPHASIS_ALPHA_RANGE: RangeInclusive<f64> = 0.05..=0.5;

/// Which generator produces subject points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Uniform random over the surface.
    #[default]
    Dispatch,
    /// Evenly spaced on a fixed circle.
    Circle,
}

/// Which side of the wedge a renderer shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    None,
    #[default]
    Inner,
    Outer,
}

/// Drag classification window in model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragWindow {
    pub width: f64,
    pub height: f64,
}

impl Default for DragWindow {
    fn default() -> Self {
        let g = GestureConfig::default();
        Self {
            width: g.drag_window_width,
            height: g.drag_window_height,
        }
    }
}

impl From<DragWindow> for GestureConfig {
    fn from(w: DragWindow) -> Self {
        Self {
            drag_window_width: w.width,
            drag_window_height: w.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Subject points per generation.
    pub tree_count: u32,
    /// Regenerate whenever a generator parameter changes.
    pub continuous_generation: bool,
    pub generator: GeneratorKind,
    /// Fixed seed for the dispatch generator; random when absent.
    pub seed: Option<u64>,
    pub emphasis: Emphasis,
    pub emphasis_alpha: f64,
    /// Initial host surface size.
    pub surface: SurfaceSize,
    pub drag_window: DragWindow,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree_count: 30,
            continuous_generation: false,
            generator: GeneratorKind::default(),
            seed: None,
            emphasis: Emphasis::default(),
            emphasis_alpha: 0.075,
            surface: SurfaceSize::default(),
            drag_window: DragWindow::default(),
        }
    }
}

impl SceneConfig {
    /// Parse from TOML without validating.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        config.validated()
    }

    /// Every out-of-range value, as human-readable messages. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !TREE_COUNT_RANGE.contains(&self.tree_count) {
            errors.push(format!(
                "tree_count must be in {}..={}, got {}",
                TREE_COUNT_RANGE.start(),
                TREE_COUNT_RANGE.end(),
                self.tree_count
            ));
        }
        if !EMPHASIS_ALPHA_RANGE.contains(&self.emphasis_alpha) {
            errors.push(format!(
                "emphasis_alpha must be in {}..={}, got {}",
                EMPHASIS_ALPHA_RANGE.start(),
                EMPHASIS_ALPHA_RANGE.end(),
                self.emphasis_alpha
            ));
        }
        if !(self.surface.width > 0.0 && self.surface.height > 0.0) {
            errors.push(format!(
                "surface must be positive, got {}x{}",
                self.surface.width, self.surface.height
            ));
        }
        if !(self.drag_window.width >= 0.0 && self.drag_window.height >= 0.0) {
            errors.push(format!(
                "drag_window must be non-negative, got {}x{}",
                self.drag_window.width, self.drag_window.height
            ));
        }
        errors
    }

    /// `self` if valid, otherwise a [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Clamp a slider-style tree count into range.
#[must_use]
pub fn clamp_tree_count(count: u32) -> u32 {
    count.max(*TREE_COUNT_RANGE.start()).min(*TREE_COUNT_RANGE.end())
}

/// Clamp a slider-style transparency into range. NaN falls back to the default.
#[must_use]
pub fn clamp_emphasis_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        return SceneConfig::default().emphasis_alpha;
    }
    alpha
        .max(*EMPHASIS_ALPHA_RANGE.start())
        .min(*EMPHASIS_ALPHA_RANGE.end())
}
