//! Pointer and keyboard input: events, coordinate mapping and per-interaction
//! pointer state.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Keys that delete the current selection.
pub const DELETE_KEYS: [&str; 2] = ["Delete", "Backspace"];

/// An input event delivered by the host, in viewport coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Pointer pressed.
    Press { x: f64, y: f64 },
    /// Pointer moved.
    Move { x: f64, y: f64 },
    /// Pointer released.
    Release { x: f64, y: f64 },
    /// Key pressed, with the multi-select modifier state at that moment.
    KeyDown {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    /// Key released.
    KeyUp {
        #[serde(default)]
        key: String,
        #[serde(default)]
        shift: bool,
    },
    /// Host asks for the drawing to be persisted.
    Persist,
}

impl CanvasEvent {
    /// Raw viewport position for pointer events.
    pub fn position(&self) -> Option<Point> {
        match *self {
            CanvasEvent::Press { x, y }
            | CanvasEvent::Move { x, y }
            | CanvasEvent::Release { x, y } => Some(Point::new(x, y)),
            CanvasEvent::KeyDown { .. } | CanvasEvent::KeyUp { .. } | CanvasEvent::Persist => None,
        }
    }
}

/// Whether a key name deletes the selection.
pub fn is_delete_key(key: &str) -> bool {
    DELETE_KEYS.contains(&key)
}

/// Convert a viewport point into canvas-local coordinates.
///
/// `bounds` is the canvas element's current bounding box; it must be read
/// per event since the canvas may move.
pub fn to_canvas_point(raw: Point, bounds: Rect) -> Point {
    raw - bounds.origin().to_vec2()
}

/// Ephemeral per-interaction pointer state.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Where the current press started.
    pub origin: Point,
    /// Previous pointer position.
    pub last: Point,
    /// Current pointer position.
    pub current: Point,
    /// Whether the pointer is down.
    pub pressed: bool,
    /// Whether the multi-select modifier is held.
    pub multi_select: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an interaction; all cached points collapse onto `point` so that
    /// the first move measures from the press.
    pub fn press(&mut self, point: Point) {
        self.origin = point;
        self.last = point;
        self.current = point;
        self.pressed = true;
    }

    /// Record a move while pressed.
    pub fn advance(&mut self, point: Point) {
        self.last = self.current;
        self.current = point;
    }

    /// End the interaction at `point`.
    pub fn release(&mut self, point: Point) {
        self.last = point;
        self.current = point;
        self.pressed = false;
    }

    /// Movement since the previous event.
    pub fn delta(&self) -> Vec2 {
        self.current - self.last
    }
}
