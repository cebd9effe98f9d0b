#![forbid(unsafe_code)]

//! Composition root: wires input decoding, the registry, the frustum model
//! and the indicators into one synchronous dispatch cycle.
//!
//! # Dispatch cycle
//!
//! ```text
//! InputEvent ─▶ GestureDecoder ─▶ GestureEvent* ─▶ PointRegistry
//!                                                     │ PointMoved*
//!                                                     ▼
//!                                  Indicators ◀── FrustumModel
//! ```
//!
//! Everything runs inside [`Scene::handle_input`]; renderers read
//! [`Scene::snapshot`] between calls.

use tracing::{debug, info};
use wv_core::{
    CaptureCommand, GestureDecoder, GestureEvent, InputEvent, SurfaceSize, Vec2,
};
use wv_model::{
    FrustumModel, InFrustumCountChanged, Point, PointId, PointMoved, PointRegistry, PointRole,
};

use crate::config::{
    Emphasis, GeneratorKind, SceneConfig, clamp_emphasis_alpha, clamp_tree_count,
};
use crate::error::Result;
use crate::generator::{TreeGenerator, generator_for};
use crate::indicators::Indicators;
use crate::snapshot::FrameSnapshot;

pub const HANDLE_BASE_RADIUS: f64 = 9.0;
pub const HANDLE_HOVER_RADIUS: f64 = 12.0;

/// The three control handles at their initial positions.
#[must_use]
pub fn default_control_handles() -> Vec<Point> {
    let handle = |id, x, y, role| {
        Point::new(PointId(id), Vec2::new(x, y), role)
            .with_radii(HANDLE_BASE_RADIUS, HANDLE_HOVER_RADIUS)
    };
    vec![
        handle(1, 40.0, -120.0, PointRole::NearEdge),
        handle(2, -40.0, -120.0, PointRole::FarEdge),
        handle(3, 120.0, 120.0, PointRole::ViewDirection),
    ]
}

/// What one input event did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDispatch {
    /// Decoded gestures, in delivery order.
    pub gestures: Vec<GestureEvent>,
    /// Pointer capture change for the host.
    pub capture: Option<CaptureCommand>,
    /// Drag moves followed by the linked handle moves they caused.
    pub moved: Vec<PointMoved>,
    /// New in-frustum counts, one per change.
    pub count_changes: Vec<usize>,
}

pub struct Scene {
    config: SceneConfig,
    decoder: GestureDecoder,
    registry: PointRegistry,
    frustum: FrustumModel,
    generator: Box<dyn TreeGenerator + Send>,
    indicators: Indicators,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("points", &self.registry.len())
            .field("generator", &self.generator.name())
            .field("in_frustum", &self.indicators.in_frustum)
            .finish()
    }
}

impl Scene {
    /// Validate the config, generate the first batch and build the model.
    pub fn new(config: SceneConfig) -> Result<Self> {
        let config = config.validated()?;
        let mut generator = generator_for(config.generator, config.seed);
        let mut points = generator.generate(config.tree_count as usize, config.surface);
        points.extend(default_control_handles());
        Self::assemble(config, generator, points)
    }

    /// Build a scene around a caller-supplied point set, which must contain
    /// all three control handles.
    pub fn with_points(config: SceneConfig, points: Vec<Point>) -> Result<Self> {
        let config = config.validated()?;
        let generator = generator_for(config.generator, config.seed);
        Self::assemble(config, generator, points)
    }

    fn assemble(
        config: SceneConfig,
        generator: Box<dyn TreeGenerator + Send>,
        points: Vec<Point>,
    ) -> Result<Self> {
        let mut registry = PointRegistry::new(points, config.surface);
        let frustum = FrustumModel::new(&mut registry)?;
        let indicators = Indicators::new(frustum.in_frustum_count(), frustum.readout());
        let decoder = GestureDecoder::centered(config.surface, config.drag_window.into());
        info!(
            message = "scene.ready",
            points = registry.len(),
            generator = generator.name(),
            in_frustum = indicators.in_frustum
        );
        Ok(Self {
            config,
            decoder,
            registry,
            frustum,
            generator,
            indicators,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &PointRegistry {
        &self.registry
    }

    #[must_use]
    pub fn frustum(&self) -> &FrustumModel {
        &self.frustum
    }

    #[must_use]
    pub fn indicators(&self) -> Indicators {
        self.indicators
    }

    #[must_use]
    pub fn decoder(&self) -> &GestureDecoder {
        &self.decoder
    }

    #[must_use]
    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Run one input event through the whole pipeline.
    pub fn handle_input(&mut self, event: &InputEvent) -> SceneDispatch {
        if let InputEvent::Resize { width, height } = *event {
            let surface = SurfaceSize::new(width, height);
            self.registry.set_surface(surface);
            self.config.surface = surface;
            debug!(message = "scene.resize", width, height);
        }

        let decoded = self.decoder.process(event);
        let mut out = SceneDispatch {
            gestures: decoded.events.to_vec(),
            capture: decoded.capture,
            ..SceneDispatch::default()
        };

        let mut readout_dirty = false;
        for gesture in &decoded.events {
            if let GestureEvent::DragStart(_) = gesture {
                self.frustum.on_drag_start();
            }

            let frustum = &mut self.frustum;
            let moves = &mut out.moved;
            let mut changes = Vec::new();
            self.registry.handle_gesture_with(gesture, |registry, moved| {
                readout_dirty |= moved.role.is_control_handle();
                let update = frustum.on_point_moved(registry, &moved);
                moves.push(moved);
                moves.extend(update.linked_moves);
                changes.extend(update.count_changed);
            });
            for change in changes {
                self.record_count_change(change, &mut out.count_changes);
            }

            match gesture {
                GestureEvent::PointerUpEnd(_) => self.frustum.on_pointer_released(),
                GestureEvent::Cancelled(_) => {
                    readout_dirty = true;
                    if let Some(change) = self.frustum.on_cancelled(&mut self.registry) {
                        self.record_count_change(change, &mut out.count_changes);
                    }
                }
                _ => {}
            }
        }

        if readout_dirty {
            self.indicators.set_readout(self.frustum.readout());
        }
        out
    }

    /// Replace the subject points with a fresh batch. Control handles keep
    /// their current positions.
    pub fn regenerate(&mut self) -> Option<InFrustumCountChanged> {
        let handles: Vec<Point> = self
            .registry
            .points()
            .iter()
            .filter(|p| p.role().is_control_handle())
            .cloned()
            .collect();
        let mut points = self
            .generator
            .generate(self.config.tree_count as usize, self.registry.surface());
        points.extend(handles);

        self.registry.set_points(points);
        self.decoder.reset();
        self.frustum.on_pointer_released();
        let change = self.frustum.recompute(&mut self.registry);
        if let Some(change) = change {
            self.indicators.on_count_changed(change);
        }
        self.indicators.set_readout(self.frustum.readout());

        info!(
            message = "scene.regenerated",
            generator = self.generator.name(),
            count = self.config.tree_count,
            in_frustum = self.frustum.in_frustum_count()
        );
        change
    }

    /// Set the tree count (clamped into range). Regenerates when continuous
    /// generation is on and the value changed.
    pub fn set_tree_count(&mut self, count: u32) -> Option<InFrustumCountChanged> {
        let count = clamp_tree_count(count);
        if count == self.config.tree_count {
            return None;
        }
        self.config.tree_count = count;
        self.regenerate_if_continuous()
    }

    /// Switch generators. Regenerates when continuous generation is on and
    /// the kind changed.
    pub fn set_generator(&mut self, kind: GeneratorKind) -> Option<InFrustumCountChanged> {
        if kind == self.config.generator {
            return None;
        }
        self.config.generator = kind;
        self.generator = generator_for(kind, self.config.seed);
        self.regenerate_if_continuous()
    }

    /// Turning continuous generation on regenerates immediately.
    pub fn set_continuous_generation(&mut self, enabled: bool) -> Option<InFrustumCountChanged> {
        let was = std::mem::replace(&mut self.config.continuous_generation, enabled);
        if enabled && !was {
            return self.regenerate();
        }
        None
    }

    pub fn set_emphasis(&mut self, emphasis: Emphasis) {
        self.config.emphasis = emphasis;
    }

    /// Set the emphasis transparency, clamped into range.
    pub fn set_emphasis_alpha(&mut self, alpha: f64) {
        self.config.emphasis_alpha = clamp_emphasis_alpha(alpha);
    }

    /// The host surface changed size.
    pub fn resize(&mut self, surface: SurfaceSize) -> SceneDispatch {
        self.handle_input(&InputEvent::Resize {
            width: surface.width,
            height: surface.height,
        })
    }

    pub fn clear_max(&mut self) {
        self.indicators.clear_max();
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(
            &self.registry,
            &self.frustum,
            self.indicators,
            self.config.emphasis,
            self.config.emphasis_alpha,
        )
    }

    fn regenerate_if_continuous(&mut self) -> Option<InFrustumCountChanged> {
        if self.config.continuous_generation {
            self.regenerate()
        } else {
            None
        }
    }

    fn record_count_change(&mut self, change: InFrustumCountChanged, out: &mut Vec<usize>) {
        self.indicators.on_count_changed(change);
        out.push(change.count);
    }
}
