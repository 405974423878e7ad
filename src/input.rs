//! Input mapping: raw key and pointer state in, per-tick intents out.
//!
//! Keyboard model: instead of acting on each key event individually we keep
//! the tick number of the last press/repeat event for every key.  A key is
//! "held" while that stamp is within the hold window, so movement and fire
//! can be held together.  Terminals that report releases drop the key at
//! once; classic terminals let it expire after the window, which is shorter
//! than the OS repeat interval.
//!
//! Pointer model: one pressed position, hit-tested against the on-screen
//! buttons.  The buttons only exist on touch-class viewports.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::collision::{Point, Rect};
use crate::scaling::{Metrics, Viewport};

/// Discrete intents the update engine consumes each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlButton {
    Left,
    Right,
    Fire,
}

impl ControlButton {
    pub fn label(self) -> &'static str {
        match self {
            ControlButton::Left => "Left",
            ControlButton::Right => "Right",
            ControlButton::Fire => "Shoot",
        }
    }
}

// ── On-screen controls ────────────────────────────────────────────────────────

/// Geometry of the on-screen buttons along the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlLayout {
    pub visible: bool,
    pub buttons: [(ControlButton, Rect); 3],
}

impl ControlLayout {
    pub fn new(viewport: &Viewport, metrics: &Metrics) -> Self {
        let (w, h, b) = (viewport.width, viewport.height, metrics.button_size);
        ControlLayout {
            visible: metrics.touch_controls,
            buttons: [
                (ControlButton::Left, Rect::new(0.0, h - b, b, h)),
                (ControlButton::Right, Rect::new(w - b, h - b, w, h)),
                (ControlButton::Fire, Rect::new(w / 2.0 - b / 2.0, h - b, w / 2.0 + b / 2.0, h)),
            ],
        }
    }

    /// The button under `p`, if the controls are shown at all.
    pub fn hit_test(&self, p: Point) -> Option<ControlButton> {
        if !self.visible {
            return None;
        }
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(p))
            .map(|&(button, _)| button)
    }
}

// ── Mapper ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct InputMapper {
    /// Each held key → the tick it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    pointer: Option<Point>,
    hold_window: u64,
}

/// Letters are stored lower-case so `A` and `a` are one key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl InputMapper {
    pub fn new(hold_window: u64) -> Self {
        InputMapper {
            key_frame: HashMap::new(),
            pointer: None,
            hold_window,
        }
    }

    /// Record a press or auto-repeat.
    pub fn key_down(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(normalize(code), frame);
    }

    pub fn key_up(&mut self, code: KeyCode) {
        self.key_frame.remove(&normalize(code));
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.pointer = Some(p);
    }

    /// Dragging only matters while pressed.
    pub fn pointer_moved(&mut self, p: Point) {
        if self.pointer.is_some() {
            self.pointer = Some(p);
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer = None;
    }

    pub fn clear(&mut self) {
        self.key_frame.clear();
        self.pointer = None;
    }

    /// Returns true if `key` was seen within the hold window.
    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Intents for tick `frame`, merging keyboard and pointer sources.
    pub fn intents(&self, frame: u64, layout: &ControlLayout) -> Intents {
        let pressed = self.pointer.and_then(|p| layout.hit_test(p));

        Intents {
            move_left: self.is_held(KeyCode::Left, frame)
                || self.is_held(KeyCode::Char('a'), frame)
                || pressed == Some(ControlButton::Left),
            move_right: self.is_held(KeyCode::Right, frame)
                || self.is_held(KeyCode::Char('d'), frame)
                || pressed == Some(ControlButton::Right),
            fire: self.is_held(KeyCode::Char(' '), frame) || pressed == Some(ControlButton::Fire),
        }
    }
}
