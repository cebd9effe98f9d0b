#![forbid(unsafe_code)]

//! Semantic gesture events produced by the [`GestureDecoder`](crate::gesture::GestureDecoder).
//!
//! # Invariants
//! 1. Every press is bracketed: `PointerDownBegin` first, then either the
//!    `PointerUpBegin` → (`DragFinish` | `Click`) → `PointerUpEnd` triple on
//!    release, or a single `Cancelled` followed by a silent release.
//! 2. `DragStart` fires at most once per press, and `DragMove` never precedes it.
//! 3. `HoverMove` is never emitted while a press is active.
//! 4. `Drag*` and `Click` never both fire for the same press.

use smallvec::SmallVec;

use crate::event::Modifiers;
use crate::geometry::Vec2;

// ---------------------------------------------------------------------------
// GesturePoint
// ---------------------------------------------------------------------------

/// Payload shared by every gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    /// Current pointer position in model space.
    pub position: Vec2,
    /// Model-space press position. `None` for hover moves.
    pub anchor: Option<Vec2>,
    /// Cumulative displacement from the anchor. Present only once dragging.
    pub delta: Option<Vec2>,
    /// Modifier keys held at the time of the raw event.
    pub modifiers: Modifiers,
    /// Host pointer id.
    pub pointer_id: u32,
}

impl GesturePoint {
    /// A bare point with no anchor, delta or modifiers.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            anchor: None,
            delta: None,
            modifiers: Modifiers::NONE,
            pointer_id: 1,
        }
    }

    #[must_use]
    pub const fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub const fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = Some(delta);
        self
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether the ctrl-equivalent selection modifier was held.
    #[inline]
    #[must_use]
    pub const fn toggle_modifier(&self) -> bool {
        self.modifiers.toggles_selection()
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// What interrupted the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The cancel key (Escape) was pressed.
    Key,
    /// The host surface lost focus.
    FocusLost,
}

/// Details carried by [`GestureEvent::Cancelled`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CancelInfo {
    /// Model-space press position of the cancelled gesture.
    pub anchor: Vec2,
    /// Whether the press had already become a drag.
    pub was_dragging: bool,
    pub reason: CancelReason,
}

// ---------------------------------------------------------------------------
// GestureEvent
// ---------------------------------------------------------------------------

/// A decoded pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Press observed, before any classification.
    PointerDownBegin(GesturePoint),
    /// Pointer moved with no press active.
    HoverMove(GesturePoint),
    /// Displacement first exceeded the drag window.
    DragStart(GesturePoint),
    /// Subsequent move while dragging; `delta` is cumulative from the anchor.
    DragMove(GesturePoint),
    /// Release after a drag.
    DragFinish(GesturePoint),
    /// Release without a drag.
    Click(GesturePoint),
    /// Opens release handling.
    PointerUpBegin(GesturePoint),
    /// Closes release handling.
    PointerUpEnd(GesturePoint),
    /// Active press cancelled.
    Cancelled(CancelInfo),
}

impl GestureEvent {
    /// Stable dotted name, used in log events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PointerDownBegin(_) => "pointerdown-begin",
            Self::HoverMove(_) => "nodrag-pointermove",
            Self::DragStart(_) => "drag-start",
            Self::DragMove(_) => "drag-move",
            Self::DragFinish(_) => "drag-finish",
            Self::Click(_) => "click",
            Self::PointerUpBegin(_) => "pointerup-begin",
            Self::PointerUpEnd(_) => "pointerup-end",
            Self::Cancelled(_) => "cancelled",
        }
    }

    /// The gesture payload, if this is not a cancellation.
    #[must_use]
    pub const fn point(&self) -> Option<&GesturePoint> {
        match self {
            Self::PointerDownBegin(p)
            | Self::HoverMove(p)
            | Self::DragStart(p)
            | Self::DragMove(p)
            | Self::DragFinish(p)
            | Self::Click(p)
            | Self::PointerUpBegin(p)
            | Self::PointerUpEnd(p) => Some(p),
            Self::Cancelled(_) => None,
        }
    }

    /// Model-space position of the event, if it carries one.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.point().map(|p| p.position)
    }

    /// Whether this event is part of a drag sequence.
    #[must_use]
    pub const fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragStart(_) | Self::DragMove(_) | Self::DragFinish(_)
        )
    }

    #[must_use]
    pub const fn is_click(&self) -> bool {
        matches!(self, Self::Click(_))
    }
}

// ---------------------------------------------------------------------------
// Dispatch result
// ---------------------------------------------------------------------------

/// Pointer capture request for the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureCommand {
    /// Route all further events for this pointer to the decoder.
    Acquire { pointer_id: u32 },
    /// Stop routing captured events.
    Release { pointer_id: u32 },
}

/// Outcome of feeding one raw event to the decoder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureDispatch {
    /// Semantic events, in delivery order.
    pub events: SmallVec<[GestureEvent; 4]>,
    /// Capture change the host should apply, if any.
    pub capture: Option<CaptureCommand>,
}

impl GestureDispatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.capture.is_none()
    }

    /// Event names in order, handy for assertions and logs.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GestureEvent::name).collect()
    }
}
