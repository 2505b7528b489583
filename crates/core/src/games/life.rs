//! Life - Conway's automaton on a wrapping 20x20 board
//!
//! Cells are `LIFE_ALIVE` or `LIFE_DEAD`; no other color is ever written.
//! While paused, clicks toggle cells, A starts the simulation and B advances
//! a single generation. While running, every tick is a generation and A
//! pauses again.

use log::trace;

use crate::engine::{GameContext, GameRules};
use crate::grid::Grid;
use crate::types::{Button, GameKind, Intent, FIELD_SIZE, LIFE_ALIVE, LIFE_DEAD};

/// Canonical glider, travelling one cell down-right every four generations
pub const GLIDER: [(i32, i32); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

/// Live cells among the 8 neighbors of (x, y), wrapping at the edges
pub fn live_neighbors(grid: &Grid, x: i32, y: i32) -> u8 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (x + dx).rem_euclid(FIELD_SIZE);
            let ny = (y + dy).rem_euclid(FIELD_SIZE);
            if grid.get(nx, ny) == Some(LIFE_ALIVE) {
                count += 1;
            }
        }
    }
    count
}

#[derive(Debug, Clone, Default)]
pub struct LifeRules {
    running: bool,
    generation: u32,
    /// Back buffer; every generation is computed here and swapped in.
    next: Grid,
}

impl LifeRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Generations stepped since the last new game
    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn toggle_cell(grid: &mut Grid, x: i32, y: i32) {
        let Some(state) = grid.get(x, y) else {
            return;
        };
        let flipped = if state == LIFE_ALIVE {
            LIFE_DEAD
        } else {
            LIFE_ALIVE
        };
        grid.set(x, y, flipped);
    }

    fn step(&mut self, ctx: &mut GameContext) {
        let current = ctx.grid();
        for y in 0..FIELD_SIZE {
            for x in 0..FIELD_SIZE {
                let alive = current.get(x, y) == Some(LIFE_ALIVE);
                let next = match (alive, live_neighbors(current, x, y)) {
                    (false, 3) => LIFE_ALIVE,
                    (true, 2) | (true, 3) => LIFE_ALIVE,
                    _ => LIFE_DEAD,
                };
                self.next.set(x, y, next);
            }
        }
        std::mem::swap(ctx.grid_mut(), &mut self.next);
        self.generation += 1;
        trace!("life: generation {}", self.generation);
    }

    fn write_label(&self, ctx: &mut GameContext) {
        let mode = if self.running { "running" } else { "paused" };
        ctx.write_info_label(format_args!("Generation {} ({})", self.generation, mode));
    }
}

impl GameRules for LifeRules {
    fn kind(&self) -> GameKind {
        GameKind::Life
    }

    fn on_new_game(&mut self, ctx: &mut GameContext) {
        self.running = false;
        self.generation = 0;
        self.next.clear(LIFE_DEAD);
        ctx.grid_mut().clear(LIFE_DEAD);
        self.write_label(ctx);
    }

    fn on_update_game(&mut self, ctx: &mut GameContext, intent: &Intent) {
        let button = intent.single_button();
        if self.running {
            if button == Some(Button::A) {
                self.running = false;
            } else {
                self.step(ctx);
            }
        } else {
            match button {
                Some(Button::A) => self.running = true,
                Some(Button::B) => self.step(ctx),
                _ => {}
            }
            if let Some((x, y)) = intent.click {
                Self::toggle_cell(ctx.grid_mut(), x, y);
            }
        }
        self.write_label(ctx);
    }
}
