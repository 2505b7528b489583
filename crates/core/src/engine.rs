//! Engine module - the lifecycle shared by every game
//!
//! [`GameEngine`] owns the field, the score, the status string and the RNG,
//! and moves through `Preview -> Play -> Over` only on explicit calls. It has
//! no game logic of its own: each call is dispatched to a [`GameRules`]
//! implementation with fixed hook slots.
//!
//! Rules signal game over through [`GameContext::game_over`]; the engine
//! performs the `Play -> Over` transition and runs the game-over hook as soon
//! as the current hook returns, before the driver can observe the field.

use std::fmt::{self, Write as _};

use log::{debug, info};

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::{Color, GameKind, GameStatus, Intent};

/// Everything a rules module may touch besides its own state
#[derive(Debug, Clone)]
pub struct GameContext {
    grid: Grid,
    score: u32,
    info_label: String,
    rng: SimpleRng,
    game_over_requested: bool,
}

impl GameContext {
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            score: 0,
            info_label: String::new(),
            rng: SimpleRng::new(seed),
            game_over_requested: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn info_label(&self) -> &str {
        &self.info_label
    }

    pub fn set_info_label(&mut self, label: &str) {
        self.info_label.clear();
        self.info_label.push_str(label);
    }

    /// Format into the status line, reusing its buffer
    pub fn write_info_label(&mut self, args: fmt::Arguments<'_>) {
        self.info_label.clear();
        // Writing into a String cannot fail.
        let _ = self.info_label.write_fmt(args);
    }

    /// Status line shown while playing
    pub fn write_score(&mut self) {
        let score = self.score;
        self.write_info_label(format_args!("Score: {}", score));
    }

    /// Status line shown once the game has ended
    pub fn write_final_score(&mut self) {
        let score = self.score;
        self.write_info_label(format_args!("Game over. Score: {}", score));
    }

    /// Shared preview screen: game title over a black field
    pub fn base_preview(&mut self, kind: GameKind) {
        self.set_info_label(kind.title());
        self.grid.clear(Color::Black);
    }

    pub fn rng(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }

    /// Ask the engine to end the current game once the running hook returns
    pub fn game_over(&mut self) {
        self.game_over_requested = true;
    }

    fn take_game_over_request(&mut self) -> bool {
        std::mem::take(&mut self.game_over_requested)
    }

    fn reset_score(&mut self) {
        self.score = 0;
    }
}

/// Hook slots a game plugs into the engine.
///
/// `on_new_game` and `on_update_game` are mandatory. The preview and game-over
/// hooks default to the shared screens; the preview/over update hooks default
/// to no-ops.
pub trait GameRules {
    fn kind(&self) -> GameKind;

    fn on_preview(&mut self, ctx: &mut GameContext) {
        ctx.base_preview(self.kind());
    }

    fn on_new_game(&mut self, ctx: &mut GameContext);

    fn on_update_preview(&mut self, _ctx: &mut GameContext, _intent: &Intent) {}

    fn on_update_game(&mut self, ctx: &mut GameContext, intent: &Intent);

    fn on_update_over(&mut self, _ctx: &mut GameContext, _intent: &Intent) {}

    fn on_game_over(&mut self, ctx: &mut GameContext) {
        ctx.write_final_score();
    }
}

impl<T: GameRules + ?Sized> GameRules for Box<T> {
    fn kind(&self) -> GameKind {
        (**self).kind()
    }

    fn on_preview(&mut self, ctx: &mut GameContext) {
        (**self).on_preview(ctx)
    }

    fn on_new_game(&mut self, ctx: &mut GameContext) {
        (**self).on_new_game(ctx)
    }

    fn on_update_preview(&mut self, ctx: &mut GameContext, intent: &Intent) {
        (**self).on_update_preview(ctx, intent)
    }

    fn on_update_game(&mut self, ctx: &mut GameContext, intent: &Intent) {
        (**self).on_update_game(ctx, intent)
    }

    fn on_update_over(&mut self, ctx: &mut GameContext, intent: &Intent) {
        (**self).on_update_over(ctx, intent)
    }

    fn on_game_over(&mut self, ctx: &mut GameContext) {
        (**self).on_game_over(ctx)
    }
}

/// Lifecycle state machine around one game.
///
/// Defaults to a boxed rules object so heterogeneous games can share a list;
/// a concrete `R` keeps the rules' own accessors available.
#[derive(Debug)]
pub struct GameEngine<R = Box<dyn GameRules>> {
    status: GameStatus,
    ctx: GameContext,
    rules: R,
    /// Latched Play -> Over event (consumed by the driver).
    game_over_event: bool,
}

impl std::fmt::Debug for dyn GameRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRules")
            .field("kind", &self.kind())
            .finish()
    }
}

impl<R: GameRules> GameEngine<R> {
    /// Create an engine in `Preview` with an RNG seeded from `seed`.
    ///
    /// The preview hook is not run until [`GameEngine::preview_game`].
    pub fn new(rules: R, seed: u32) -> Self {
        Self {
            status: GameStatus::Preview,
            ctx: GameContext::new(seed),
            rules,
            game_over_event: false,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.rules.kind()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.ctx.score()
    }

    pub fn grid(&self) -> &Grid {
        self.ctx.grid()
    }

    pub fn info_label(&self) -> &str {
        self.ctx.info_label()
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Any state -> `Preview`
    pub fn preview_game(&mut self) {
        debug!("{}: preview", self.kind().as_str());
        self.status = GameStatus::Preview;
        self.game_over_event = false;
        self.ctx.take_game_over_request();
        self.rules.on_preview(&mut self.ctx);
    }

    /// Any state -> `Play`, with the score reset
    pub fn new_game(&mut self) {
        debug!("{}: new game", self.kind().as_str());
        self.status = GameStatus::Play;
        self.game_over_event = false;
        self.ctx.reset_score();
        self.ctx.take_game_over_request();
        self.rules.on_new_game(&mut self.ctx);
        self.settle_game_over();
    }

    /// Advance one tick, dispatching to the hook for the current status
    pub fn update(&mut self, intent: &Intent) {
        match self.status {
            GameStatus::Play => self.rules.on_update_game(&mut self.ctx, intent),
            GameStatus::Preview => self.rules.on_update_preview(&mut self.ctx, intent),
            GameStatus::Over => self.rules.on_update_over(&mut self.ctx, intent),
        }
        self.settle_game_over();
    }

    /// `Play -> Over`, running the game-over hook.
    ///
    /// Returns false (and does nothing) outside `Play`.
    pub fn game_over(&mut self) -> bool {
        if self.status != GameStatus::Play {
            return false;
        }
        info!(
            "{}: game over, score {}",
            self.kind().as_str(),
            self.ctx.score()
        );
        self.status = GameStatus::Over;
        self.game_over_event = true;
        self.rules.on_game_over(&mut self.ctx);
        true
    }

    /// Take and clear the latched game-over event.
    pub fn take_game_over(&mut self) -> bool {
        std::mem::take(&mut self.game_over_event)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.game = self.kind();
        out.status = self.status;
        out.score = self.ctx.score();
        out.info_label.clear();
        out.info_label.push_str(self.ctx.info_label());
        self.ctx.grid().write_u8_grid(&mut out.grid);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut R, &mut GameContext) {
        (&mut self.rules, &mut self.ctx)
    }

    fn settle_game_over(&mut self) {
        if self.ctx.take_game_over_request() {
            self.game_over();
        }
    }
}
