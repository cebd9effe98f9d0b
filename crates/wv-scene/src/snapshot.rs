#![forbid(unsafe_code)]

//! Per-frame, read-only view of the scene for renderers.

use serde::Serialize;
use wv_core::{SurfaceSize, Vec2};
use wv_model::angle::{angle_of, display_degrees, normalize_angle};
use wv_model::{FrustumModel, LassoState, Point, PointRegistry};

use crate::config::Emphasis;
use crate::indicators::Indicators;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointView {
    pub id: u32,
    pub role: &'static str,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub selected: bool,
    pub hovered: bool,
    pub pressed: bool,
    pub in_lasso_preview: bool,
    pub in_frustum: bool,
}

impl From<&Point> for PointView {
    fn from(p: &Point) -> Self {
        Self {
            id: p.id().0,
            role: p.role().label(),
            x: p.x(),
            y: p.y(),
            radius: p.radius(),
            selected: p.is_selected(),
            hovered: p.is_pointer_over(),
            pressed: p.is_pointer_down(),
            in_lasso_preview: p.is_in_lasso_preview(),
            in_frustum: p.is_in_frustum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LassoView {
    pub active: bool,
    pub anchor: Vec2,
    pub width: f64,
    pub height: f64,
}

impl From<LassoState> for LassoView {
    fn from(l: LassoState) -> Self {
        Self {
            active: l.active,
            anchor: l.anchor,
            width: l.width,
            height: l.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrustumView {
    /// Normalized near-edge angle in radians.
    pub near_edge_angle: f64,
    /// Normalized far-edge angle in radians.
    pub far_edge_angle: f64,
    pub near_edge_degrees: i32,
    pub far_edge_degrees: i32,
    pub alpha_degrees: i32,
    pub beta_degrees: i32,
    pub in_frustum_count: usize,
}

impl FrustumView {
    fn capture(model: &FrustumModel, registry: &PointRegistry) -> Self {
        let handles = model.handles();
        let edge = |id| {
            registry
                .position_of(id)
                .map(|p| normalize_angle(angle_of(p)))
                .unwrap_or(0.0)
        };
        let near = edge(handles.near_edge);
        let far = edge(handles.far_edge);
        let readout = model.readout();
        Self {
            near_edge_angle: near,
            far_edge_angle: far,
            near_edge_degrees: display_degrees(near),
            far_edge_degrees: display_degrees(far),
            alpha_degrees: readout.alpha_degrees,
            beta_degrees: readout.beta_degrees,
            in_frustum_count: model.in_frustum_count(),
        }
    }
}

/// Everything a renderer reads between dispatch cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub surface: SurfaceSize,
    pub points: Vec<PointView>,
    pub lasso: LassoView,
    pub frustum: FrustumView,
    pub indicators: Indicators,
    pub emphasis: Emphasis,
    pub emphasis_alpha: f64,
}

impl FrameSnapshot {
    #[must_use]
    pub fn capture(
        registry: &PointRegistry,
        model: &FrustumModel,
        indicators: Indicators,
        emphasis: Emphasis,
        emphasis_alpha: f64,
    ) -> Self {
        Self {
            surface: registry.surface(),
            points: registry.points().iter().map(PointView::from).collect(),
            lasso: registry.lasso().into(),
            frustum: FrustumView::capture(model, registry),
            indicators,
            emphasis,
            emphasis_alpha,
        }
    }
}
