#![forbid(unsafe_code)]

//! Core: raw pointer input, plane geometry, and gesture decoding.
//!
//! # Role in wedgeview
//! `wv-core` is the input layer. It owns the canonical raw event types a host
//! surface delivers, the model-space geometry every other crate shares, and
//! the [`GestureDecoder`](gesture::GestureDecoder) that classifies pointer
//! sequences into clicks, drags, hovers and cancellations.
//!
//! # Primary responsibilities
//! - **InputEvent**: pointer down/move/up, keys, focus and resize.
//! - **Geometry**: `Vec2`, `Rect`, `SurfaceSize`, and device → model transforms.
//! - **GestureEvent**: the semantic vocabulary consumed by the point registry.
//! - **GestureDecoder**: the press/drag/cancel state machine.
//!
//! # How it fits in the system
//! `wv-model` consumes [`GestureEvent`](semantic_event::GestureEvent)s and
//! never sees raw input. `wv-scene` owns a decoder and feeds it whatever the
//! host produces.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod semantic_event;

pub use event::{InputEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerEventKind};
pub use geometry::{CenteredTransform, CoordinateTransform, IdentityTransform, Rect, SurfaceSize, Vec2};
pub use gesture::{GestureConfig, GestureDecoder};
pub use semantic_event::{
    CancelInfo, CancelReason, CaptureCommand, GestureDispatch, GestureEvent, GesturePoint,
};
