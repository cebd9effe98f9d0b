#![forbid(unsafe_code)]

//! Canonical raw input types.
//!
//! These are the low-level signals a host surface delivers: pointer
//! down/move/up in device pixels, key presses, focus changes and surface
//! resizes. The [`GestureDecoder`](crate::gesture::GestureDecoder) turns them
//! into semantic gesture events.
//!
//! # Design Notes
//!
//! - Pointer coordinates are device pixels relative to the surface's top-left
//!   corner; conversion to model space happens inside the decoder.
//! - `KeyEventKind` defaults to `Press` when the host cannot tell.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum InputEvent {
    /// A pointer (mouse, pen, touch) event.
    Pointer(PointerEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// Focus gained or lost by the host surface.
    Focus {
        /// `true` = focus gained, `false` = focus lost.
        gained: bool,
    },

    /// The host surface was resized.
    Resize {
        /// New surface width in device pixels.
        width: f64,
        /// New surface height in device pixels.
        height: f64,
    },
}

/// A pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// The pointer lifecycle phase.
    pub kind: PointerEventKind,

    /// Host-assigned pointer identifier.
    #[cfg_attr(feature = "serde", serde(default = "default_pointer_id"))]
    pub pointer_id: u32,

    /// X coordinate in device pixels (0 = left edge of the surface).
    pub x: f64,

    /// Y coordinate in device pixels (0 = top edge of the surface).
    pub y: f64,

    /// Modifier keys held during the event.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Modifiers,
}

#[cfg(feature = "serde")]
const fn default_pointer_id() -> u32 {
    PointerEvent::PRIMARY_POINTER_ID
}

impl PointerEvent {
    /// Pointer id used by the convenience constructors.
    pub const PRIMARY_POINTER_ID: u32 = 1;

    /// Create a pointer event for the primary pointer with no modifiers.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            pointer_id: Self::PRIMARY_POINTER_ID,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a pointer event for another pointer id.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Pointer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerEventKind {
    /// Button pressed / contact started.
    Down,

    /// Pointer moved, with or without a button held.
    Move,

    /// Button released / contact ended.
    Up,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Modifiers,

    /// The type of key event (press or release).
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// True for a press of the Escape key.
    #[must_use]
    pub fn is_escape_press(&self) -> bool {
        self.code == KeyCode::Escape && self.kind == KeyEventKind::Press
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Escape key. Pressing it cancels an active press.
    Escape,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguished).
    #[default]
    Press,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Whether the selection-toggle modifier (Ctrl) is held.
    #[must_use]
    pub const fn toggles_selection(self) -> bool {
        self.contains(Self::CTRL)
    }
}
