#![forbid(unsafe_code)]

//! Plane points: identity, role, capabilities and transient interaction state.

use bitflags::bitflags;
use wv_core::Vec2;

/// Stable identifier of a point within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a point stands for. Exactly one role per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    /// Tracked for frustum membership.
    Subject,
    /// Direction handle, angle-locked to the near edge.
    ViewDirection,
    /// First edge of the wedge.
    NearEdge,
    /// Second edge of the wedge.
    FarEdge,
}

impl PointRole {
    /// All three frustum control roles.
    pub const CONTROL_HANDLES: [Self; 3] = [Self::ViewDirection, Self::NearEdge, Self::FarEdge];

    #[inline]
    #[must_use]
    pub const fn is_control_handle(self) -> bool {
        !matches!(self, Self::Subject)
    }

    /// Kebab-case label used in logs and snapshots.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::ViewDirection => "view-direction",
            Self::NearEdge => "near-edge",
            Self::FarEdge => "far-edge",
        }
    }
}

bitflags! {
    /// Independent per-point capability flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const MOVABLE    = 0b001;
        const SELECTABLE = 0b010;
        const HOVERABLE  = 0b100;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// A point on the plane.
///
/// Geometry and capabilities are set at construction; the interaction flags
/// are owned by the [`PointRegistry`](crate::registry::PointRegistry) and the
/// frustum flag by the [`FrustumModel`](crate::frustum::FrustumModel).
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: PointId,
    role: PointRole,
    position: Vec2,
    base_radius: f64,
    hover_radius: f64,
    capabilities: Capabilities,

    selected: bool,
    pointer_over: bool,
    pointer_down: bool,
    in_lasso_preview: bool,
    position_at_press: Vec2,
    in_frustum: bool,
}

impl Point {
    pub const DEFAULT_BASE_RADIUS: f64 = 5.0;
    pub const DEFAULT_HOVER_RADIUS: f64 = 9.0;

    /// New point with default radii and every capability enabled.
    #[must_use]
    pub fn new(id: PointId, position: Vec2, role: PointRole) -> Self {
        Self {
            id,
            role,
            position,
            base_radius: Self::DEFAULT_BASE_RADIUS,
            hover_radius: Self::DEFAULT_HOVER_RADIUS,
            capabilities: Capabilities::default(),
            selected: false,
            pointer_over: false,
            pointer_down: false,
            in_lasso_preview: false,
            position_at_press: position,
            in_frustum: false,
        }
    }

    /// Subject point shorthand.
    #[must_use]
    pub fn subject(id: u32, x: f64, y: f64) -> Self {
        Self::new(PointId(id), Vec2::new(x, y), PointRole::Subject)
    }

    #[must_use]
    pub fn with_radii(mut self, base: f64, hover: f64) -> Self {
        self.base_radius = base;
        self.hover_radius = hover;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> PointId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn role(&self) -> PointRole {
        self.role
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[must_use]
    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    #[must_use]
    pub fn hover_radius(&self) -> f64 {
        self.hover_radius
    }

    /// Hit-test and display radius: the hover radius while the pointer is over
    /// the point, otherwise the base radius.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        if self.pointer_over {
            self.hover_radius
        } else {
            self.base_radius
        }
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[inline]
    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.capabilities.contains(Capabilities::MOVABLE)
    }

    #[inline]
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.capabilities.contains(Capabilities::SELECTABLE)
    }

    #[inline]
    #[must_use]
    pub fn is_hoverable(&self) -> bool {
        self.capabilities.contains(Capabilities::HOVERABLE)
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn is_pointer_over(&self) -> bool {
        self.pointer_over
    }

    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    #[must_use]
    pub fn is_in_lasso_preview(&self) -> bool {
        self.in_lasso_preview
    }

    /// Position recorded at the last press.
    #[must_use]
    pub fn position_at_press(&self) -> Vec2 {
        self.position_at_press
    }

    /// Frustum membership. Meaningful for subject points only.
    #[must_use]
    pub fn is_in_frustum(&self) -> bool {
        self.in_frustum
    }

    // -- state owned by the registry and frustum model --

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_pointer_over(&mut self, over: bool) {
        self.pointer_over = over;
    }

    pub(crate) fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    pub(crate) fn set_in_lasso_preview(&mut self, preview: bool) {
        self.in_lasso_preview = preview;
    }

    pub(crate) fn snapshot_press_position(&mut self) {
        self.position_at_press = self.position;
    }

    pub(crate) fn set_in_frustum(&mut self, inside: bool) {
        self.in_frustum = inside;
    }

    /// Drop every interaction flag, keeping geometry and capabilities.
    pub(crate) fn clear_transient(&mut self) {
        self.selected = false;
        self.pointer_over = false;
        self.pointer_down = false;
        self.in_lasso_preview = false;
        self.position_at_press = self.position;
    }
}
