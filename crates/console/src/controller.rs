//! Input latch between a driver's button events and per-tick intents.
//!
//! Drivers report presses and releases as they happen; the console samples
//! the latch once per tick. A tap that starts and ends between two ticks is
//! still seen exactly once, and a held button is seen on every tick.

use crate::types::{Button, Buttons, Intent};
use gameboy_core::Grid;

#[derive(Debug, Clone, Default)]
pub struct Controller {
    /// Buttons to report on the next tick
    pending: Buttons,
    /// Buttons currently held down
    held: Buttons,
    click: Option<(i32, i32)>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.pending.insert(button);
        self.held.insert(button);
    }

    /// Release only drops the held state; a pending press still fires.
    pub fn release(&mut self, button: Button) {
        self.held.remove(button);
    }

    /// Record a click on the field. Off-field clicks are dropped.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        if !Grid::in_bounds(x, y) {
            return false;
        }
        self.click = Some((x, y));
        true
    }

    pub fn held(&self) -> Buttons {
        self.held
    }

    /// Sample this tick's intent and re-arm the latch from the held set.
    pub fn take_intent(&mut self) -> Intent {
        let intent = Intent {
            buttons: self.pending,
            click: self.click.take(),
        };
        self.pending.retain(self.held);
        intent
    }

    /// Forget everything, e.g. when switching games.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
