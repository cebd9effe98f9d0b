#![forbid(unsafe_code)]

//! Scene: the composition root of wedgeview.
//!
//! # Role in wedgeview
//! `wv-scene` owns one [`GestureDecoder`](wv_core::GestureDecoder), one
//! [`PointRegistry`](wv_model::PointRegistry) and one
//! [`FrustumModel`](wv_model::FrustumModel), and runs every input event
//! through them synchronously. It also carries the collaborators a host UI
//! would otherwise supply: configuration, subject generators, indicators and
//! the per-frame snapshot.
//!
//! # Primary responsibilities
//! - **SceneConfig**: TOML-loadable, validated settings.
//! - **TreeGenerator**: circle and seeded random subject batches.
//! - **Scene**: dispatch, regeneration and slider-style setters.
//! - **FrameSnapshot**: the serializable, read-only renderer contract.
//! - **script / cli**: headless replay for the `wedgeview` binary.
//!
//! # Failure Modes
//! Construction fails on invalid configuration or missing control handles.
//! Once built, input handling is total.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod scene;
pub mod script;
pub mod snapshot;

pub use cli::{Cli, run, run_from_env};
pub use config::{DragWindow, Emphasis, GeneratorKind, SceneConfig};
pub use error::{ConfigError, Result, SceneError};
pub use generator::{CircleGenerator, DispatchGenerator, TreeGenerator, generator_for};
pub use indicators::Indicators;
pub use scene::{Scene, SceneDispatch, default_control_handles};
pub use script::{ControlOp, ReplayReport, ScriptStep, load_script, parse_script, replay};
pub use snapshot::{FrameSnapshot, FrustumView, LassoView, PointView};
