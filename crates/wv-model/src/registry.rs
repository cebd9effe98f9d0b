#![forbid(unsafe_code)]

//! Point registry: hit testing, selection, hover, dragging and rollback.
//!
//! [`PointRegistry`] owns every point and consumes decoded
//! [`GestureEvent`]s. Each call to
//! [`handle_gesture_with`](PointRegistry::handle_gesture_with) runs
//! synchronously and hands every applied move to the caller before the next
//! point moves, so the frustum model can relink its handles in between.
//!
//! # Press modes
//!
//! A press either lands on a selectable, movable point (move mode: the
//! current selection follows the drag) or it does not (lasso mode: the drag
//! spans a selection rectangle).
//!
//! # Invariants
//!
//! 1. Non-selectable points are never selected.
//! 2. Every drag-applied position lies within `±half_width × ±half_height`.
//! 3. A cancelled press restores every point to its press-time position.
//! 4. At most one point carries the hover flag.

use ahash::AHashMap;
use tracing::{debug, info, trace, warn};
use wv_core::{GestureEvent, GesturePoint, Rect, SurfaceSize, Vec2};

use crate::point::{Capabilities, Point, PointId, PointRole};

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Who initiated a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOrigin {
    /// Programmatic move through [`PointRegistry::move_point`]. Linked handle
    /// updates use this origin so they never trigger another linked update.
    User,
    /// Move applied while decoding a drag gesture.
    Event,
}

/// A point changed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMoved {
    pub id: PointId,
    pub role: PointRole,
    pub origin: MoveOrigin,
    /// Position after clamping.
    pub position: Vec2,
}

// ---------------------------------------------------------------------------
// Lasso
// ---------------------------------------------------------------------------

/// Read-only lasso rectangle state for renderers.
///
/// `width` and `height` are signed: the rectangle spans `anchor` to
/// `anchor + (width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LassoState {
    pub active: bool,
    pub anchor: Vec2,
    pub width: f64,
    pub height: f64,
}

impl LassoState {
    /// Normalized rectangle covered by the lasso.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_corners(
            self.anchor,
            self.anchor + Vec2::new(self.width, self.height),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct PressState {
    anchor: Vec2,
    /// Selectable point under the press, if any.
    hit: Option<PointId>,
    /// Nearest point under the press regardless of capabilities.
    pressed: Option<PointId>,
    lasso_mode: bool,
}

// ---------------------------------------------------------------------------
// PointRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PointRegistry {
    points: Vec<Point>,
    index: AHashMap<PointId, usize>,
    surface: SurfaceSize,
    lasso: LassoState,
    press: Option<PressState>,
    hovered: Option<PointId>,
}

impl PointRegistry {
    #[must_use]
    pub fn new(points: Vec<Point>, surface: SurfaceSize) -> Self {
        let mut registry = Self {
            surface,
            ..Self::default()
        };
        registry.set_points(points);
        registry
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.index.get(&id).map(|&i| &self.points[i])
    }

    #[must_use]
    pub fn position_of(&self, id: PointId) -> Option<Vec2> {
        self.point(id).map(Point::position)
    }

    /// Replace the whole point set. Interaction state starts fresh.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.index.clear();
        for (i, p) in self.points.iter_mut().enumerate() {
            p.clear_transient();
            if let Some(prev) = self.index.insert(p.id(), i) {
                warn!(message = "registry.duplicate_id", id = p.id().0, previous_index = prev);
            }
        }
        self.press = None;
        self.hovered = None;
        self.lasso = LassoState::default();
        info!(message = "registry.points_replaced", count = self.points.len());
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Update the clamp bounds. Existing positions are left untouched.
    pub fn set_surface(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    /// Move a point programmatically, clamped to the surface.
    ///
    /// Returns `None` if the id is unknown.
    pub fn move_point(&mut self, id: PointId, position: Vec2) -> Option<PointMoved> {
        let idx = *self.index.get(&id)?;
        Some(self.apply_move(idx, position, MoveOrigin::User))
    }

    /// Change a point's capabilities, dropping flags it can no longer hold.
    pub fn set_capabilities(&mut self, id: PointId, capabilities: Capabilities) -> bool {
        let Some(&idx) = self.index.get(&id) else {
            return false;
        };
        let p = &mut self.points[idx];
        p.set_capabilities(capabilities);
        if !p.is_selectable() {
            p.set_selected(false);
            p.set_in_lasso_preview(false);
        }
        if !p.is_hoverable() && self.hovered == Some(id) {
            p.set_pointer_over(false);
            self.hovered = None;
        }
        true
    }

    /// Closest point whose own radius covers `pos`. Ties go to the earlier
    /// point.
    #[must_use]
    pub fn find_point_at(&self, pos: Vec2) -> Option<&Point> {
        self.hit_test(pos, Capabilities::empty())
            .map(|i| &self.points[i])
    }

    #[must_use]
    pub fn lasso(&self) -> LassoState {
        self.lasso
    }

    pub fn selected(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.is_selected())
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<PointId> {
        self.selected().map(Point::id).collect()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<PointId> {
        self.hovered
    }

    /// Whether a press is in progress.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Apply one decoded gesture and collect the moves it applied.
    pub fn handle_gesture(&mut self, event: &GestureEvent) -> Vec<PointMoved> {
        let mut moved = Vec::new();
        self.handle_gesture_with(event, |_, m| moved.push(m));
        moved
    }

    /// Apply one decoded gesture, handing each move to `on_move` as soon as
    /// that point has moved and before the next one does.
    ///
    /// `on_move` may move other points through [`move_point`](Self::move_point);
    /// a later point in the same drag step sees those positions.
    pub fn handle_gesture_with<F>(&mut self, event: &GestureEvent, mut on_move: F)
    where
        F: FnMut(&mut Self, PointMoved),
    {
        match event {
            GestureEvent::PointerDownBegin(p) => self.on_pointer_down(p),
            GestureEvent::HoverMove(p) => self.on_hover_move(p),
            GestureEvent::DragStart(_) | GestureEvent::DragFinish(_) => {}
            GestureEvent::DragMove(p) => self.on_drag_move(p, &mut on_move),
            GestureEvent::Click(p) => self.on_click(p),
            GestureEvent::PointerUpBegin(_) => self.on_pointer_up(),
            GestureEvent::PointerUpEnd(_) => self.press = None,
            GestureEvent::Cancelled(_) => self.on_cancelled(),
        }
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }
}

// ---------------------------------------------------------------------------
// Gesture handlers
// ---------------------------------------------------------------------------

impl PointRegistry {
    fn hit_test(&self, pos: Vec2, required: Capabilities) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            if !p.capabilities().contains(required) {
                continue;
            }
            let d = p.position().distance(pos);
            if d > p.radius() {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    fn apply_move(&mut self, idx: usize, target: Vec2, origin: MoveOrigin) -> PointMoved {
        let position = self.surface.clamp(target);
        let p = &mut self.points[idx];
        p.set_position(position);
        PointMoved {
            id: p.id(),
            role: p.role(),
            origin,
            position,
        }
    }

    fn clear_selection(&mut self) {
        for p in &mut self.points {
            p.set_selected(false);
        }
    }

    fn on_pointer_down(&mut self, gp: &GesturePoint) {
        let anchor = gp.position;
        let ctrl = gp.toggle_modifier();
        let pressed = self.hit_test(anchor, Capabilities::empty());
        let hit = self.hit_test(anchor, Capabilities::SELECTABLE);
        let lasso_mode = hit.is_none_or(|i| !self.points[i].is_movable());

        for p in &mut self.points {
            p.snapshot_press_position();
        }

        if let Some(i) = pressed {
            self.points[i].set_pointer_down(true);
        }

        if lasso_mode {
            self.lasso = LassoState {
                active: true,
                anchor,
                width: 0.0,
                height: 0.0,
            };
            for p in &mut self.points {
                p.set_in_lasso_preview(false);
            }
            if !ctrl {
                self.clear_selection();
            }
        } else if let Some(i) = hit {
            if ctrl {
                // Select only; deselecting here would leave a drag moving the
                // rest of the selection away from the pointer.
                self.points[i].set_selected(true);
            } else if !self.points[i].is_selected() {
                self.clear_selection();
                self.points[i].set_selected(true);
            }
        }

        let hit_id = hit.map(|i| self.points[i].id());
        self.press = Some(PressState {
            anchor,
            hit: hit_id,
            pressed: pressed.map(|i| self.points[i].id()),
            lasso_mode,
        });

        debug!(
            message = "registry.press",
            hit = ?hit_id,
            lasso = lasso_mode,
            ctrl = ctrl,
            x = anchor.x,
            y = anchor.y
        );
    }

    fn on_hover_move(&mut self, gp: &GesturePoint) {
        if self.press.is_some() {
            return;
        }
        let pos = gp.position;

        if let Some(id) = self.hovered
            && let Some(&i) = self.index.get(&id)
        {
            let p = &mut self.points[i];
            if p.position().distance(pos) > p.radius() {
                p.set_pointer_over(false);
                self.hovered = None;
                trace!(message = "registry.hover_leave", id = id.0);
            }
        }

        if self.hovered.is_none()
            && let Some(i) = self.hit_test(pos, Capabilities::HOVERABLE)
        {
            let p = &mut self.points[i];
            p.set_pointer_over(true);
            self.hovered = Some(p.id());
            trace!(message = "registry.hover_enter", id = p.id().0);
        }
    }

    fn on_drag_move<F>(&mut self, gp: &GesturePoint, on_move: &mut F)
    where
        F: FnMut(&mut Self, PointMoved),
    {
        let Some(press) = self.press else {
            return;
        };
        let delta = gp.delta.unwrap_or(gp.position - press.anchor);

        if press.lasso_mode {
            self.lasso.width = delta.x;
            self.lasso.height = delta.y;
            let rect = Rect::from_corners(press.anchor, press.anchor + delta);
            let ctrl = gp.toggle_modifier();

            for p in &mut self.points {
                if !p.is_selectable() {
                    continue;
                }
                let inside = rect.contains(p.position());
                if inside != p.is_in_lasso_preview() {
                    if ctrl {
                        p.set_selected(!p.is_selected());
                    } else {
                        p.set_selected(inside);
                    }
                    p.set_in_lasso_preview(inside);
                }
            }
            trace!(message = "registry.lasso", width = delta.x, height = delta.y);
            return;
        }

        let mut count = 0usize;
        let mut i = 0;
        while let Some(p) = self.points.get(i) {
            if p.is_movable() && p.is_selected() {
                let target = p.position_at_press() + delta;
                let moved = self.apply_move(i, target, MoveOrigin::Event);
                count += 1;
                on_move(self, moved);
            }
            i += 1;
        }
        trace!(message = "registry.drag", moved = count, dx = delta.x, dy = delta.y);
    }

    fn on_click(&mut self, gp: &GesturePoint) {
        let Some(hit) = self.press.and_then(|p| p.hit) else {
            return;
        };
        if gp.toggle_modifier() {
            return;
        }
        let Some(&i) = self.index.get(&hit) else {
            return;
        };
        if !self.points[i].is_selectable() {
            return;
        }
        self.clear_selection();
        self.points[i].set_selected(true);
        debug!(message = "registry.click_select", id = hit.0);
    }

    fn on_pointer_up(&mut self) {
        self.lasso.active = false;
        if let Some(pressed) = self.press.and_then(|p| p.pressed)
            && let Some(&i) = self.index.get(&pressed)
        {
            self.points[i].set_pointer_down(false);
        }
    }

    fn on_cancelled(&mut self) {
        let had_press = self.press.is_some();
        let hovered = self.hovered.take();

        for p in &mut self.points {
            if had_press {
                p.set_position(p.position_at_press());
            }
            let clears_hover = (p.is_movable() && p.is_selected() && p.is_hoverable())
                || Some(p.id()) == hovered;
            if clears_hover {
                p.set_pointer_over(false);
            }
            p.set_pointer_down(false);
        }

        self.lasso = LassoState::default();
        self.press = None;
        debug!(message = "registry.cancelled", restored = had_press);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wv_core::{CancelInfo, CancelReason, Modifiers};

    fn registry(points: Vec<Point>) -> PointRegistry {
        PointRegistry::new(points, SurfaceSize::new(800.0, 600.0))
    }

    fn gp(x: f64, y: f64) -> GesturePoint {
        GesturePoint::at(Vec2::new(x, y))
    }

    fn press(r: &mut PointRegistry, x: f64, y: f64, mods: Modifiers) {
        r.handle_gesture(&GestureEvent::PointerDownBegin(
            gp(x, y).with_anchor(Vec2::new(x, y)).with_modifiers(mods),
        ));
    }

    fn drag(r: &mut PointRegistry, from: Vec2, to: Vec2, mods: Modifiers) -> Vec<PointMoved> {
        let p = GesturePoint::at(to)
            .with_anchor(from)
            .with_delta(to - from)
            .with_modifiers(mods);
        r.handle_gesture(&GestureEvent::DragStart(p));
        r.handle_gesture(&GestureEvent::DragMove(p))
    }

    fn release(r: &mut PointRegistry, x: f64, y: f64, clicked: bool, mods: Modifiers) {
        let p = gp(x, y).with_modifiers(mods);
        r.handle_gesture(&GestureEvent::PointerUpBegin(p));
        if clicked {
            r.handle_gesture(&GestureEvent::Click(p));
        } else {
            r.handle_gesture(&GestureEvent::DragFinish(p));
        }
        r.handle_gesture(&GestureEvent::PointerUpEnd(p));
    }

    fn click(r: &mut PointRegistry, x: f64, y: f64, mods: Modifiers) {
        press(r, x, y, mods);
        release(r, x, y, true, mods);
    }

    fn cancel(r: &mut PointRegistry) {
        r.handle_gesture(&GestureEvent::Cancelled(CancelInfo {
            anchor: Vec2::ZERO,
            was_dragging: true,
            reason: CancelReason::Key,
        }));
    }

    fn ids(r: &PointRegistry) -> Vec<u32> {
        r.selected_ids().into_iter().map(|id| id.0).collect()
    }

    // --- Hit testing ---

    #[test]
    fn find_point_at_prefers_closest_then_first() {
        let r = registry(vec![
            Point::subject(1, 3.0, 0.0),
            Point::subject(2, -3.0, 0.0),
            Point::subject(3, 0.0, 4.0),
        ]);
        assert_eq!(
            r.find_point_at(Vec2::new(0.0, 3.5)).map(Point::id),
            Some(PointId(3))
        );
        // Equidistant from 1 and 2: first encountered wins.
        assert_eq!(r.find_point_at(Vec2::ZERO).map(Point::id), Some(PointId(1)));
        assert!(r.find_point_at(Vec2::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn hit_radius_is_inclusive() {
        let r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        assert!(r.find_point_at(Vec2::new(5.0, 0.0)).is_some());
        assert!(r.find_point_at(Vec2::new(5.01, 0.0)).is_none());
    }

    // --- Selection ---

    #[test]
    fn lasso_without_modifier_selects_covered_points() {
        let mut r = registry(vec![
            Point::subject(1, 0.0, 0.0),
            Point::subject(2, 5.0, 5.0),
            Point::subject(3, 50.0, 50.0),
        ]);
        // Press outside every hit radius, drag a rectangle from there.
        press(&mut r, -10.0, -10.0, Modifiers::NONE);
        assert!(r.lasso().active);
        drag(&mut r, Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0), Modifiers::NONE);
        assert_eq!(ids(&r), [1, 2]);
        assert_eq!(r.lasso().width, 20.0);
        release(&mut r, 10.0, 10.0, false, Modifiers::NONE);
        assert!(!r.lasso().active);
        assert_eq!(ids(&r), [1, 2]);
    }

    #[test]
    fn lasso_direction_does_not_matter() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 50.0, 50.0)]);
        press(&mut r, 10.0, 10.0, Modifiers::NONE);
        drag(&mut r, Vec2::new(10.0, 10.0), Vec2::new(-10.0, -10.0), Modifiers::NONE);
        assert_eq!(ids(&r), [1]);
    }

    #[test]
    fn lasso_tracks_preview_transitions() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        press(&mut r, -10.0, -10.0, Modifiers::NONE);
        drag(&mut r, Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0), Modifiers::NONE);
        assert!(r.points()[0].is_selected());
        // Shrinking the rectangle drops the point again.
        drag(&mut r, Vec2::new(-10.0, -10.0), Vec2::new(-9.0, -9.0), Modifiers::NONE);
        assert!(!r.points()[0].is_selected());
    }

    #[test]
    fn ctrl_lasso_toggles_on_transition() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 100.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        click(&mut r, 100.0, 0.0, Modifiers::CTRL);
        assert_eq!(ids(&r), [1, 2]);

        press(&mut r, -10.0, -10.0, Modifiers::CTRL);
        // Selection is kept when the modifier is held.
        assert_eq!(ids(&r), [1, 2]);
        drag(&mut r, Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0), Modifiers::CTRL);
        assert_eq!(ids(&r), [2]);
    }

    #[test]
    fn plain_lasso_press_clears_selection() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        press(&mut r, 200.0, 200.0, Modifiers::NONE);
        assert!(r.selected_ids().is_empty());
    }

    #[test]
    fn click_on_selected_point_reduces_multi_selection() {
        let mut r = registry(vec![
            Point::subject(1, 0.0, 0.0),
            Point::subject(2, 5.0, 5.0),
            Point::subject(3, 50.0, 50.0),
        ]);
        press(&mut r, -10.0, -10.0, Modifiers::NONE);
        drag(&mut r, Vec2::new(-10.0, -10.0), Vec2::new(60.0, 60.0), Modifiers::NONE);
        release(&mut r, 60.0, 60.0, false, Modifiers::NONE);
        assert_eq!(ids(&r), [1, 2, 3]);

        // Press keeps the multi-selection (the point is already selected).
        press(&mut r, 50.0, 50.0, Modifiers::NONE);
        assert_eq!(ids(&r), [1, 2, 3]);
        release(&mut r, 50.0, 50.0, true, Modifiers::NONE);
        assert_eq!(ids(&r), [3]);
    }

    #[test]
    fn ctrl_press_on_selected_point_does_not_deselect() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 100.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        click(&mut r, 100.0, 0.0, Modifiers::CTRL);
        click(&mut r, 0.0, 0.0, Modifiers::CTRL);
        assert_eq!(ids(&r), [1, 2]);
    }

    #[test]
    fn ctrl_drag_of_selected_point_moves_selection() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 100.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        click(&mut r, 100.0, 0.0, Modifiers::CTRL);
        press(&mut r, 0.0, 0.0, Modifiers::CTRL);
        let moved = drag(&mut r, Vec2::ZERO, Vec2::new(0.0, 20.0), Modifiers::CTRL);
        assert_eq!(moved.len(), 2);
        assert_eq!(r.position_of(PointId(2)), Some(Vec2::new(100.0, 20.0)));
    }

    #[test]
    fn non_selectable_points_never_selected_but_hoverable() {
        let locked = Capabilities::MOVABLE | Capabilities::HOVERABLE;
        let mut r = registry(vec![
            Point::subject(1, 0.0, 0.0).with_capabilities(locked),
            Point::subject(2, 50.0, 0.0),
        ]);

        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        assert!(r.selected_ids().is_empty());
        click(&mut r, 0.0, 0.0, Modifiers::CTRL);
        assert!(r.selected_ids().is_empty());

        press(&mut r, -20.0, -20.0, Modifiers::NONE);
        drag(&mut r, Vec2::new(-20.0, -20.0), Vec2::new(60.0, 20.0), Modifiers::NONE);
        release(&mut r, 60.0, 20.0, false, Modifiers::NONE);
        assert_eq!(ids(&r), [2]);

        r.handle_gesture(&GestureEvent::HoverMove(gp(1.0, 1.0)));
        assert_eq!(r.hovered(), Some(PointId(1)));
        assert!(r.points()[0].is_pointer_over());
    }

    #[test]
    fn immovable_selectable_point_enters_lasso_then_click_selects() {
        let mut r = registry(vec![
            Point::subject(1, 0.0, 0.0)
                .with_capabilities(Capabilities::SELECTABLE | Capabilities::HOVERABLE),
        ]);
        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        assert!(r.lasso().active);
        release(&mut r, 0.0, 0.0, true, Modifiers::NONE);
        assert_eq!(ids(&r), [1]);

        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        let moved = drag(&mut r, Vec2::ZERO, Vec2::new(100.0, 0.0), Modifiers::NONE);
        assert!(moved.is_empty());
        assert_eq!(r.position_of(PointId(1)), Some(Vec2::ZERO));
    }

    // --- Hover ---

    #[test]
    fn hover_uses_hover_radius_to_leave() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        r.handle_gesture(&GestureEvent::HoverMove(gp(4.0, 0.0)));
        assert_eq!(r.hovered(), Some(PointId(1)));
        assert_eq!(r.points()[0].radius(), 9.0);
        // Still within the hover radius.
        r.handle_gesture(&GestureEvent::HoverMove(gp(8.0, 0.0)));
        assert_eq!(r.hovered(), Some(PointId(1)));
        r.handle_gesture(&GestureEvent::HoverMove(gp(9.5, 0.0)));
        assert_eq!(r.hovered(), None);
        assert_eq!(r.points()[0].radius(), 5.0);
    }

    #[test]
    fn hover_moves_directly_to_new_target() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 30.0, 0.0)]);
        r.handle_gesture(&GestureEvent::HoverMove(gp(0.0, 0.0)));
        r.handle_gesture(&GestureEvent::HoverMove(gp(30.0, 0.0)));
        assert_eq!(r.hovered(), Some(PointId(2)));
        assert!(!r.points()[0].is_pointer_over());
    }

    #[test]
    fn non_hoverable_point_is_not_hovered() {
        let mut r = registry(vec![
            Point::subject(1, 0.0, 0.0).with_capabilities(Capabilities::SELECTABLE),
        ]);
        r.handle_gesture(&GestureEvent::HoverMove(gp(0.0, 0.0)));
        assert_eq!(r.hovered(), None);
    }

    // --- Dragging ---

    #[test]
    fn drag_moves_selection_and_reports_event_origin() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 100.0, 100.0)]);
        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        let moved = drag(&mut r, Vec2::ZERO, Vec2::new(10.0, -20.0), Modifiers::NONE);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, PointId(1));
        assert_eq!(moved[0].origin, MoveOrigin::Event);
        assert_eq!(r.position_of(PointId(1)), Some(Vec2::new(10.0, -20.0)));
        assert_eq!(r.position_of(PointId(2)), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn drag_delta_is_applied_from_press_snapshot() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        drag(&mut r, Vec2::ZERO, Vec2::new(30.0, 0.0), Modifiers::NONE);
        drag(&mut r, Vec2::ZERO, Vec2::new(40.0, 0.0), Modifiers::NONE);
        assert_eq!(r.position_of(PointId(1)), Some(Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn drag_is_clamped_per_axis() {
        let mut r = registry(vec![Point::subject(1, 390.0, 0.0)]);
        press(&mut r, 390.0, 0.0, Modifiers::NONE);
        let moved = drag(&mut r, Vec2::new(390.0, 0.0), Vec2::new(900.0, 50.0), Modifiers::NONE);
        assert_eq!(moved[0].position, Vec2::new(400.0, 50.0));
    }

    #[test]
    fn press_and_release_toggle_pressed_flag() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        assert!(r.points()[0].is_pointer_down());
        release(&mut r, 0.0, 0.0, true, Modifiers::NONE);
        assert!(!r.points()[0].is_pointer_down());
        assert!(!r.is_pressed());
    }

    #[test]
    fn non_selectable_point_still_reports_pressed() {
        let fixed = Point::subject(1, 0.0, 0.0).with_capabilities(Capabilities::HOVERABLE);
        let mut r = registry(vec![fixed, Point::subject(2, 100.0, 0.0)]);
        click(&mut r, 100.0, 0.0, Modifiers::NONE);

        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        assert!(r.points()[0].is_pointer_down());
        // Still a lasso press: the selection is cleared, nothing is selected.
        assert!(r.lasso().active);
        assert!(ids(&r).is_empty());

        release(&mut r, 0.0, 0.0, true, Modifiers::NONE);
        assert!(!r.points()[0].is_pointer_down());
        assert!(ids(&r).is_empty());
    }

    // --- Cancellation ---

    #[test]
    fn cancel_rolls_back_drag() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0), Point::subject(2, 20.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        click(&mut r, 20.0, 0.0, Modifiers::CTRL);
        r.handle_gesture(&GestureEvent::HoverMove(gp(0.0, 0.0)));
        assert!(r.points()[0].is_pointer_over());

        press(&mut r, 0.0, 0.0, Modifiers::NONE);
        drag(&mut r, Vec2::ZERO, Vec2::new(50.0, 50.0), Modifiers::NONE);
        assert_eq!(r.position_of(PointId(2)), Some(Vec2::new(70.0, 50.0)));

        cancel(&mut r);
        assert_eq!(r.position_of(PointId(1)), Some(Vec2::ZERO));
        assert_eq!(r.position_of(PointId(2)), Some(Vec2::new(20.0, 0.0)));
        assert!(!r.points()[0].is_pointer_over());
        assert_eq!(r.hovered(), None);
        assert!(!r.is_pressed());
        assert!(!r.points()[0].is_pointer_down());
    }

    #[test]
    fn cancel_ends_lasso() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        press(&mut r, -10.0, -10.0, Modifiers::NONE);
        drag(&mut r, Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0), Modifiers::NONE);
        cancel(&mut r);
        assert_eq!(r.lasso(), LassoState::default());
    }

    #[test]
    fn cancel_without_press_keeps_positions() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        r.move_point(PointId(1), Vec2::new(5.0, 5.0));
        cancel(&mut r);
        assert_eq!(r.position_of(PointId(1)), Some(Vec2::new(5.0, 5.0)));
    }

    // --- Programmatic API ---

    #[test]
    fn move_point_is_user_sourced_and_clamped() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        let m = r.move_point(PointId(1), Vec2::new(-1000.0, 10.0));
        assert_eq!(
            m,
            Some(PointMoved {
                id: PointId(1),
                role: PointRole::Subject,
                origin: MoveOrigin::User,
                position: Vec2::new(-400.0, 10.0),
            })
        );
        assert!(r.move_point(PointId(99), Vec2::ZERO).is_none());
    }

    #[test]
    fn set_points_resets_interaction_state() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        r.handle_gesture(&GestureEvent::HoverMove(gp(0.0, 0.0)));
        let pts = r.points().to_vec();
        r.set_points(pts);
        assert!(r.selected_ids().is_empty());
        assert_eq!(r.hovered(), None);
        assert!(!r.points()[0].is_pointer_over());
    }

    #[test]
    fn revoking_capabilities_drops_flags() {
        let mut r = registry(vec![Point::subject(1, 0.0, 0.0)]);
        click(&mut r, 0.0, 0.0, Modifiers::NONE);
        r.handle_gesture(&GestureEvent::HoverMove(gp(0.0, 0.0)));
        assert!(r.set_capabilities(PointId(1), Capabilities::MOVABLE));
        assert!(!r.points()[0].is_selected());
        assert!(!r.points()[0].is_pointer_over());
        assert!(!r.set_capabilities(PointId(2), Capabilities::all()));
    }
}
