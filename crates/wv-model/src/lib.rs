#![forbid(unsafe_code)]

//! Model: points, selection semantics, and the angular frustum.
//!
//! # Role in wedgeview
//! `wv-model` is the interaction/geometry engine. It consumes decoded
//! gestures from `wv-core` and owns all mutable point state.
//!
//! # Primary responsibilities
//! - **Point**: role, capability flags, radii and transient interaction flags.
//! - **PointRegistry**: hit testing, click/ctrl/lasso selection, hover,
//!   drag application with surface clamping, and cancel rollback.
//! - **FrustumModel**: keeps the three control handles angularly consistent
//!   and classifies subject points as inside or outside the wedge.
//! - **angle**: normalization and wraparound-aware span arithmetic.
//!
//! # How it fits in the system
//! A composition root feeds each [`GestureEvent`](wv_core::GestureEvent) to
//! [`PointRegistry::handle_gesture_with`], forwards each [`PointMoved`] to
//! [`FrustumModel::on_point_moved`] as it happens, and brackets drags
//! with [`FrustumModel::on_drag_start`] / [`FrustumModel::on_pointer_released`].
//! Renderers only read state between dispatch cycles.

pub mod angle;
pub mod error;
pub mod frustum;
pub mod point;
pub mod registry;

pub use error::{FrustumError, Result};
pub use frustum::{
    AngleReadout, BaseCapture, ControlHandles, FrustumModel, FrustumUpdate, HandleTracker,
    InFrustumCountChanged, TrackerState,
};
pub use point::{Capabilities, Point, PointId, PointRole};
pub use registry::{LassoState, MoveOrigin, PointMoved, PointRegistry};
