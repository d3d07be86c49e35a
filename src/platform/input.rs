//! Keyboard latch
//!
//! Tracks which movement keys are physically held. Event handlers write it,
//! the simulation reads a snapshot once per tick.

use crate::sim::TickInput;

/// A movement control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" | "a" => Some(Control::Left),
            "ArrowRight" | "Right" | "d" => Some(Control::Right),
            _ => None,
        }
    }

    /// Map a key-down to a control, unless the key is going into a text field
    pub fn routed(key: &str, typing: bool) -> Option<Self> {
        if typing { None } else { Self::from_key(key) }
    }
}

/// Current held state of both movement controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub moving_left: bool,
    pub moving_right: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.set(control, true);
    }

    pub fn release(&mut self, control: Control) {
        self.set(control, false);
    }

    /// Handle a key-down. Returns true if the key is a movement control.
    pub fn key_down(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.press(control);
                true
            }
            None => false,
        }
    }

    /// Handle a key-up. Returns true if the key is a movement control.
    pub fn key_up(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.release(control);
                true
            }
            None => false,
        }
    }

    /// Release everything (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for one simulation tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            move_left: self.moving_left,
            move_right: self.moving_right,
        }
    }

    fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Left => self.moving_left = held,
            Control::Right => self.moving_right = held,
        }
    }
}
