#![forbid(unsafe_code)]

//! Gesture decoding: turns raw pointer/key signals into semantic gestures.
//!
//! [`GestureDecoder`] owns one press at a time. Raw coordinates go through a
//! single [`CoordinateTransform`] before any classification, so every
//! threshold and payload is expressed in model units.
//!
//! # State Machine
//!
//! ```text
//!            down                 |d| > window            up
//!   Idle ───────────▶ Pressed ─────────────────▶ Dragging ─────▶ Idle
//!    ▲                   │  │                        │
//!    │        up (click) │  └──── Esc / focus-lost ──┤
//!    └───────────────────┘                           ▼
//!    └──────────────────── up (silent) ─────────── Cancelled
//! ```
//!
//! # Invariants
//!
//! 1. `DragStart` fires exactly once per press, on the first move whose
//!    displacement from the anchor exceeds the drag window on either axis
//!    (strict, per-axis). That move emits nothing else.
//! 2. `DragMove` carries the cumulative delta from the anchor, never the
//!    step from the previous move.
//! 3. A cancelled press swallows every move until release; the release emits
//!    no gesture events, only the capture release.
//! 4. While a press is active, events from a different pointer id are ignored.
//!
//! # Failure Modes
//!
//! - Release with no prior press is inert.
//! - A second cancel while already cancelled is a no-op.

use smallvec::SmallVec;

use crate::event::{InputEvent, KeyEvent, Modifiers, PointerEvent, PointerEventKind};
use crate::geometry::{CenteredTransform, CoordinateTransform, SurfaceSize, Vec2};
use crate::semantic_event::{
    CancelInfo, CancelReason, CaptureCommand, GestureDispatch, GestureEvent, GesturePoint,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Drag classification thresholds, in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Horizontal half-window a press may wander before it becomes a drag (default: 6).
    pub drag_window_width: f64,
    /// Vertical half-window a press may wander before it becomes a drag (default: 6).
    pub drag_window_height: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_window_width: 6.0,
            drag_window_height: 6.0,
        }
    }
}

impl GestureConfig {
    /// Whether `delta` leaves the drag window on either axis.
    #[inline]
    #[must_use]
    pub fn exceeds_window(&self, delta: Vec2) -> bool {
        delta.x.abs() > self.drag_window_width || delta.y.abs() > self.drag_window_height
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct PressTracker {
    pointer_id: u32,
    anchor: Vec2,
    dragging: bool,
    cancelled: bool,
}

// ---------------------------------------------------------------------------
// GestureDecoder
// ---------------------------------------------------------------------------

/// Stateful decoder from raw input to [`GestureEvent`]s.
#[derive(Debug, Clone)]
pub struct GestureDecoder<T: CoordinateTransform = CenteredTransform> {
    config: GestureConfig,
    transform: T,
    press: Option<PressTracker>,
}

impl GestureDecoder<CenteredTransform> {
    /// Decoder centering model space on a surface of the given size.
    #[must_use]
    pub fn centered(surface: SurfaceSize, config: GestureConfig) -> Self {
        Self::new(CenteredTransform::new(surface), config)
    }
}

impl<T: CoordinateTransform> GestureDecoder<T> {
    #[must_use]
    pub fn new(transform: T, config: GestureConfig) -> Self {
        Self {
            config,
            transform,
            press: None,
        }
    }

    /// Decode one raw event.
    pub fn process(&mut self, event: &InputEvent) -> GestureDispatch {
        let mut out = GestureDispatch::default();
        match event {
            InputEvent::Pointer(pe) => match pe.kind {
                PointerEventKind::Down => self.on_pointer_down(pe, &mut out),
                PointerEventKind::Move => self.on_pointer_move(pe, &mut out),
                PointerEventKind::Up => self.on_pointer_up(pe, &mut out),
            },
            InputEvent::Key(key) => self.on_key(key, &mut out),
            InputEvent::Focus { gained: false } => self.cancel(CancelReason::FocusLost, &mut out),
            InputEvent::Focus { gained: true } => {}
            InputEvent::Resize { width, height } => {
                self.transform
                    .set_surface(SurfaceSize::new(*width, *height));
            }
        }
        out
    }

    /// Whether a press is active and not cancelled.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some_and(|p| !p.cancelled)
    }

    /// Whether the active press has become a drag.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging && !p.cancelled)
    }

    /// Drop any active press without emitting events.
    pub fn reset(&mut self) {
        self.press = None;
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut T {
        &mut self.transform
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl<T: CoordinateTransform> GestureDecoder<T> {
    fn model_pos(&self, pe: &PointerEvent) -> Vec2 {
        self.transform.to_model(Vec2::new(pe.x, pe.y))
    }

    fn on_pointer_down(&mut self, pe: &PointerEvent, out: &mut GestureDispatch) {
        if let Some(active) = self.press
            && !active.cancelled
            && active.pointer_id != pe.pointer_id
        {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                message = "gesture.foreign_pointer_ignored",
                active = active.pointer_id,
                pointer_id = pe.pointer_id
            );
            return;
        }

        let anchor = self.model_pos(pe);
        self.press = Some(PressTracker {
            pointer_id: pe.pointer_id,
            anchor,
            dragging: false,
            cancelled: false,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "gesture.press",
            pointer_id = pe.pointer_id,
            x = anchor.x,
            y = anchor.y
        );

        out.events.push(GestureEvent::PointerDownBegin(point(
            anchor,
            Some(anchor),
            None,
            pe.modifiers,
            pe.pointer_id,
        )));
        out.capture = Some(CaptureCommand::Acquire {
            pointer_id: pe.pointer_id,
        });
    }

    fn on_pointer_move(&mut self, pe: &PointerEvent, out: &mut GestureDispatch) {
        let pos = self.model_pos(pe);
        let config = self.config;

        let Some(press) = self.press.as_mut() else {
            out.events.push(GestureEvent::HoverMove(point(
                pos,
                None,
                None,
                pe.modifiers,
                pe.pointer_id,
            )));
            return;
        };

        if press.cancelled || press.pointer_id != pe.pointer_id {
            return;
        }

        let delta = pos - press.anchor;
        let gp = point(
            pos,
            Some(press.anchor),
            Some(delta),
            pe.modifiers,
            pe.pointer_id,
        );

        if press.dragging {
            out.events.push(GestureEvent::DragMove(gp));
        } else if config.exceeds_window(delta) {
            press.dragging = true;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "gesture.drag_start",
                pointer_id = pe.pointer_id,
                dx = delta.x,
                dy = delta.y
            );
            out.events.push(GestureEvent::DragStart(gp));
        }
    }

    fn on_pointer_up(&mut self, pe: &PointerEvent, out: &mut GestureDispatch) {
        let Some(press) = self.press else {
            return;
        };
        if press.pointer_id != pe.pointer_id {
            return;
        }
        self.press = None;
        out.capture = Some(CaptureCommand::Release {
            pointer_id: pe.pointer_id,
        });

        if press.cancelled {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "gesture.release_after_cancel", pointer_id = pe.pointer_id);
            return;
        }

        let pos = self.model_pos(pe);
        let gp = point(
            pos,
            Some(press.anchor),
            Some(pos - press.anchor),
            pe.modifiers,
            pe.pointer_id,
        );

        out.events.push(GestureEvent::PointerUpBegin(gp));
        if press.dragging {
            out.events.push(GestureEvent::DragFinish(gp));
        } else {
            out.events.push(GestureEvent::Click(gp));
        }
        out.events.push(GestureEvent::PointerUpEnd(gp));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "gesture.release",
            pointer_id = pe.pointer_id,
            dragged = press.dragging
        );
    }

    fn on_key(&mut self, key: &KeyEvent, out: &mut GestureDispatch) {
        if key.is_escape_press() {
            self.cancel(CancelReason::Key, out);
        }
    }

    fn cancel(&mut self, reason: CancelReason, out: &mut GestureDispatch) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if press.cancelled {
            return;
        }
        press.cancelled = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "gesture.cancelled",
            pointer_id = press.pointer_id,
            was_dragging = press.dragging,
            reason = ?reason
        );

        out.events.push(GestureEvent::Cancelled(CancelInfo {
            anchor: press.anchor,
            was_dragging: press.dragging,
            reason,
        }));
    }
}

fn point(
    position: Vec2,
    anchor: Option<Vec2>,
    delta: Option<Vec2>,
    modifiers: Modifiers,
    pointer_id: u32,
) -> GesturePoint {
    GesturePoint {
        position,
        anchor,
        delta,
        modifiers,
        pointer_id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
