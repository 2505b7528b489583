//! Headless game selector hosting one engine per game.
//!
//! The console owns the three engines (Snake, Blocks, Life) and the input
//! latch. Drivers forward button events and call [`Console::tick`] at a
//! fixed rate; rendering reads [`Console::snapshot`].

use log::{debug, info};

use crate::config::ConsoleConfig;
use crate::controller::Controller;
use crate::types::{Button, GameKind, GameStatus};
use gameboy_core::{games, GameEngine, GameSnapshot};

/// Top-level console mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Choosing a game; the selected engine shows its preview.
    Select,
    Play,
    /// The selected game is over; its final screen stays up.
    End,
}

#[derive(Debug)]
pub struct Console {
    engines: Vec<GameEngine>,
    selected: usize,
    mode: Mode,
    paused: bool,
    controller: Controller,
}

impl Console {
    pub fn new(config: &ConsoleConfig) -> Self {
        let engines: Vec<GameEngine> = GameKind::ALL
            .iter()
            .map(|&kind| GameEngine::new(games::for_kind(kind), config.seed))
            .collect();
        let selected = GameKind::ALL
            .iter()
            .position(|&kind| kind == config.game)
            .unwrap_or(0);

        let mut console = Self {
            engines,
            selected,
            mode: Mode::Select,
            paused: false,
            controller: Controller::new(),
        };
        console.engine_mut().preview_game();
        console
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn selected(&self) -> GameKind {
        self.engine().kind()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engines[self.selected]
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engines[self.selected]
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine().snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine().snapshot_into(out);
    }

    pub fn select_next(&mut self) -> bool {
        self.select_offset(1)
    }

    pub fn select_prev(&mut self) -> bool {
        self.select_offset(self.engines.len() - 1)
    }

    fn select_offset(&mut self, offset: usize) -> bool {
        if self.mode != Mode::Select {
            return false;
        }
        self.selected = (self.selected + offset) % self.engines.len();
        debug!("console: selected {}", self.selected().as_str());
        self.engine_mut().preview_game();
        true
    }

    /// Begin a new game from `Select` or `End`.
    pub fn start(&mut self) -> bool {
        if self.mode == Mode::Play {
            return false;
        }
        self.begin();
        true
    }

    /// New game while playing.
    pub fn restart(&mut self) -> bool {
        if self.mode != Mode::Play {
            return false;
        }
        self.begin();
        true
    }

    fn begin(&mut self) {
        self.mode = Mode::Play;
        self.paused = false;
        self.controller.reset();
        debug!("console: start {}", self.selected().as_str());
        self.engine_mut().new_game();
    }

    /// Back to game selection from `Play` or `End`.
    pub fn back_to_menu(&mut self) -> bool {
        if self.mode == Mode::Select {
            return false;
        }
        self.mode = Mode::Select;
        self.paused = false;
        self.controller.reset();
        debug!("console: back to menu");
        self.engine_mut().preview_game();
        true
    }

    /// Freeze or resume ticks while playing.
    pub fn toggle_pause(&mut self) -> bool {
        if self.mode != Mode::Play {
            return false;
        }
        self.paused = !self.paused;
        debug!("console: paused = {}", self.paused);
        true
    }

    /// Button presses reach the game only while playing.
    pub fn press(&mut self, button: Button) {
        if self.mode == Mode::Play {
            self.controller.press(button);
        }
    }

    pub fn release(&mut self, button: Button) {
        self.controller.release(button);
    }

    pub fn click(&mut self, x: i32, y: i32) -> bool {
        self.mode == Mode::Play && self.controller.click(x, y)
    }

    /// Advance the selected engine one tick.
    ///
    /// Returns true on the tick the game ends. Paused ticks do nothing.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        let intent = self.controller.take_intent();
        let engine = &mut self.engines[self.selected];
        engine.update(&intent);

        if engine.take_game_over() || (self.mode == Mode::Play && engine.status() == GameStatus::Over)
        {
            info!(
                "console: {} ended with score {}",
                engine.kind().as_str(),
                engine.score()
            );
            self.mode = Mode::End;
            self.controller.reset();
            return true;
        }
        false
    }
}
