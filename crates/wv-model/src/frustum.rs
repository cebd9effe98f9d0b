#![forbid(unsafe_code)]

//! Angular frustum: three linked control handles and wedge membership.
//!
//! The wedge is anchored at the origin and bounded by the near-edge and
//! far-edge handles. The view-direction handle is angle-locked to the near
//! edge:
//!
//! - dragging the **near edge** swings the view handle along with it and
//!   leaves the far edge alone, which changes the wedge width;
//! - dragging the **view handle** moves the near edge onto its angle and
//!   rotates the far edge by the same amount, which turns the wedge rigidly.
//!
//! Base angles and lengths are captured once per drag by a
//! [`HandleTracker`] and every later update is computed from that base, so
//! errors do not compound over a long drag.

use std::f64::consts::TAU;

use smallvec::SmallVec;
use tracing::{debug, info, warn};
use wv_core::Vec2;

use crate::angle::{Polar, angle_of, delta_angle, display_degrees, is_within_wedge, normalize_angle};
use crate::error::{FrustumError, Result};
use crate::point::{Point, PointId, PointRole};
use crate::registry::{MoveOrigin, PointMoved, PointRegistry};

// ---------------------------------------------------------------------------
// Control handles
// ---------------------------------------------------------------------------

/// Ids of the three control handles, resolved once from point roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHandles {
    pub view_direction: PointId,
    pub near_edge: PointId,
    pub far_edge: PointId,
}

impl ControlHandles {
    /// Find exactly one point per control role.
    pub fn resolve(points: &[Point]) -> Result<Self> {
        let mut found: [Option<PointId>; 3] = [None; 3];
        for p in points {
            let slot = match p.role() {
                PointRole::ViewDirection => 0,
                PointRole::NearEdge => 1,
                PointRole::FarEdge => 2,
                PointRole::Subject => continue,
            };
            if let Some(first) = found[slot] {
                return Err(FrustumError::DuplicateHandle {
                    role: p.role(),
                    first,
                    second: p.id(),
                });
            }
            found[slot] = Some(p.id());
        }

        let [view, near, far] = found;
        let missing = |role| FrustumError::MissingHandle { role };
        Ok(Self {
            view_direction: view.ok_or_else(|| missing(PointRole::ViewDirection))?,
            near_edge: near.ok_or_else(|| missing(PointRole::NearEdge))?,
            far_edge: far.ok_or_else(|| missing(PointRole::FarEdge))?,
        })
    }

    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        id == self.view_direction || id == self.near_edge || id == self.far_edge
    }
}

// ---------------------------------------------------------------------------
// Per-drag tracker
// ---------------------------------------------------------------------------

/// Handle geometry captured at the start of a linked update sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseCapture {
    pub near_edge: Polar,
    pub far_edge: Polar,
    /// Angle is the near-edge angle it is locked to; length is the view
    /// handle's own distance from the origin.
    pub view_direction: Polar,
}

/// Tracker state for one draggable control handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackerState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag started; the next linked move captures the base.
    ArmedForBaseCapture,
    /// Base captured for the rest of this drag.
    Tracking(BaseCapture),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandleTracker {
    state: TrackerState,
}

impl HandleTracker {
    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Drag started.
    pub fn arm(&mut self) {
        self.state = TrackerState::ArmedForBaseCapture;
    }

    /// Drag ended or was cancelled.
    pub fn release(&mut self) {
        self.state = TrackerState::Idle;
    }

    /// Base geometry for the current linked update.
    ///
    /// Armed trackers capture once and keep the result until released. Idle
    /// trackers capture fresh on every call without storing it.
    pub fn base_for(
        &mut self,
        capture: impl FnOnce() -> Option<BaseCapture>,
    ) -> Option<BaseCapture> {
        match self.state {
            TrackerState::Tracking(base) => Some(base),
            TrackerState::ArmedForBaseCapture => {
                let base = capture()?;
                self.state = TrackerState::Tracking(base);
                Some(base)
            }
            TrackerState::Idle => capture(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// The number of subject points inside the wedge changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFrustumCountChanged {
    pub count: usize,
}

/// Whole-degree readouts for angle labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AngleReadout {
    /// Wedge width.
    pub alpha_degrees: i32,
    /// View direction, shown negated so clockwise reads positive.
    pub beta_degrees: i32,
}

/// Result of reacting to one point move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrustumUpdate {
    /// Handle moves applied to keep the triple consistent.
    pub linked_moves: SmallVec<[PointMoved; 2]>,
    pub count_changed: Option<InFrustumCountChanged>,
}

// ---------------------------------------------------------------------------
// FrustumModel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FrustumModel {
    handles: ControlHandles,
    near_edge_tracker: HandleTracker,
    view_direction_tracker: HandleTracker,
    in_frustum_count: Option<usize>,
    alpha: f64,
    beta: f64,
}

impl FrustumModel {
    /// Resolve the control handles, snap the view handle onto the near-edge
    /// angle, and classify every subject point.
    ///
    /// The initial count is recorded without a notification.
    pub fn new(registry: &mut PointRegistry) -> Result<Self> {
        let handles = ControlHandles::resolve(registry.points())?;
        let mut model = Self {
            handles,
            near_edge_tracker: HandleTracker::default(),
            view_direction_tracker: HandleTracker::default(),
            in_frustum_count: None,
            alpha: 0.0,
            beta: 0.0,
        };
        model.snap_view_to_near(registry);
        model.recompute(registry);
        info!(
            message = "frustum.init",
            count = model.in_frustum_count(),
            alpha = model.readout().alpha_degrees,
            beta = model.readout().beta_degrees
        );
        Ok(model)
    }

    #[must_use]
    pub fn handles(&self) -> ControlHandles {
        self.handles
    }

    /// Subject points currently inside the wedge.
    #[must_use]
    pub fn in_frustum_count(&self) -> usize {
        self.in_frustum_count.unwrap_or(0)
    }

    /// Wedge width in radians, as of the last recomputation.
    #[must_use]
    pub fn alpha_angle(&self) -> f64 {
        self.alpha
    }

    /// Normalized view-direction angle in radians, as of the last recomputation.
    #[must_use]
    pub fn beta_angle(&self) -> f64 {
        self.beta
    }

    #[must_use]
    pub fn readout(&self) -> AngleReadout {
        AngleReadout {
            alpha_degrees: display_degrees(self.alpha),
            beta_degrees: -display_degrees(self.beta),
        }
    }

    #[must_use]
    pub fn near_edge_tracker(&self) -> &HandleTracker {
        &self.near_edge_tracker
    }

    #[must_use]
    pub fn view_direction_tracker(&self) -> &HandleTracker {
        &self.view_direction_tracker
    }

    /// Arm both trackers for a new drag session.
    pub fn on_drag_start(&mut self) {
        self.near_edge_tracker.arm();
        self.view_direction_tracker.arm();
    }

    /// Drag session over; the next drag captures fresh bases.
    pub fn on_pointer_released(&mut self) {
        self.near_edge_tracker.release();
        self.view_direction_tracker.release();
    }

    /// The registry rolled a press back. Drop tracker state and reclassify.
    pub fn on_cancelled(&mut self, registry: &mut PointRegistry) -> Option<InFrustumCountChanged> {
        self.on_pointer_released();
        self.recompute(registry)
    }

    /// React to a point move reported by the registry.
    ///
    /// Only drag-applied moves are considered; moves issued through
    /// [`PointRegistry::move_point`] (including the linked updates made here)
    /// are ignored. The handle's current registry position is used, not the
    /// one in `moved`, so a linked update made since then is respected.
    pub fn on_point_moved(&mut self, registry: &mut PointRegistry, moved: &PointMoved) -> FrustumUpdate {
        let mut update = FrustumUpdate::default();
        if moved.origin != MoveOrigin::Event {
            return update;
        }
        let position = registry.position_of(moved.id).unwrap_or(moved.position);

        let handles = self.handles;
        if moved.id == handles.near_edge {
            let base = self
                .near_edge_tracker
                .base_for(|| capture_base(registry, handles));
            if let Some(base) = base {
                let near_angle = angle_of(position);
                let view = Vec2::from_polar(near_angle, base.view_direction.length);
                update
                    .linked_moves
                    .extend(registry.move_point(handles.view_direction, view));
            }
        } else if moved.id == handles.view_direction {
            let base = self
                .view_direction_tracker
                .base_for(|| capture_base(registry, handles));
            if let Some(base) = base {
                let view_angle = angle_of(position);
                let near = Vec2::from_polar(view_angle, base.near_edge.length);
                let far = Vec2::from_polar(
                    base.far_edge.angle + (view_angle - base.view_direction.angle),
                    base.far_edge.length,
                );
                update
                    .linked_moves
                    .extend(registry.move_point(handles.near_edge, near));
                update
                    .linked_moves
                    .extend(registry.move_point(handles.far_edge, far));
            }
        }

        update.count_changed = self.recompute(registry);
        update
    }

    /// Reclassify every subject point and refresh the angle readouts.
    ///
    /// Returns a notification only when the inside count differs from the
    /// previously recorded one.
    pub fn recompute(&mut self, registry: &mut PointRegistry) -> Option<InFrustumCountChanged> {
        let (Some(near_pos), Some(far_pos), Some(view_pos)) = (
            registry.position_of(self.handles.near_edge),
            registry.position_of(self.handles.far_edge),
            registry.position_of(self.handles.view_direction),
        ) else {
            warn!(message = "frustum.handles_missing");
            return None;
        };

        let near = normalize_angle(angle_of(near_pos));
        let far = normalize_angle(angle_of(far_pos));
        let span = delta_angle(near, far);
        let real_far = (near - span) % TAU;

        self.alpha = span;
        self.beta = normalize_angle(angle_of(view_pos));

        let mut count = 0;
        for p in registry.points_mut() {
            let inside = p.role() == PointRole::Subject
                && is_within_wedge(normalize_angle(angle_of(p.position())), near, real_far);
            p.set_in_frustum(inside);
            count += usize::from(inside);
        }

        if self.in_frustum_count == Some(count) {
            return None;
        }
        let previous = self.in_frustum_count.replace(count);
        debug!(message = "frustum.count_changed", count, previous = ?previous);
        Some(InFrustumCountChanged { count })
    }

    fn snap_view_to_near(&self, registry: &mut PointRegistry) {
        let (Some(near), Some(view)) = (
            registry.position_of(self.handles.near_edge),
            registry.position_of(self.handles.view_direction),
        ) else {
            return;
        };
        registry.move_point(
            self.handles.view_direction,
            Vec2::from_polar(angle_of(near), view.length()),
        );
    }
}

fn capture_base(registry: &PointRegistry, handles: ControlHandles) -> Option<BaseCapture> {
    let near = Polar::of(registry.position_of(handles.near_edge)?);
    let far = Polar::of(registry.position_of(handles.far_edge)?);
    let view = registry.position_of(handles.view_direction)?;
    Some(BaseCapture {
        near_edge: near,
        far_edge: far,
        view_direction: Polar {
            angle: near.angle,
            length: view.length(),
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
