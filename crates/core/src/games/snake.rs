//! Snake - a growing body chasing food
//!
//! The body is a chain of cells, head first. Every tick each cell moves along
//! its own direction, then directions shift one link down the chain, so the
//! body follows the head. Eating food appends the cell the tail just left.

use arrayvec::ArrayVec;
use log::trace;

use crate::body::{Body, Cell};
use crate::engine::{GameContext, GameRules};
use crate::grid::Grid;
use crate::types::{
    Color, Direction, GameKind, Intent, FIELD_CELLS, FIELD_SIZE, SNAKE_START, SNAKE_START_LEN,
};

const BACKGROUND: Color = Color::White;
const HEAD: Color = Color::Green;
const SEGMENT: Color = Color::Black;
const FOOD: Color = Color::Red;

#[derive(Debug, Clone, Default)]
pub struct SnakeRules {
    body: Body,
    food: Option<Cell>,
}

impl SnakeRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body cells, head first
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn head(&self) -> Option<&Cell> {
        self.body.first()
    }

    /// Current food; `None` once the field is completely filled
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// A position is free iff it is on the field and not covered by the body
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        Grid::in_bounds(x, y) && !self.body.contains(x, y)
    }

    /// Turn the head, refusing a direct reversal into the body
    fn steer(&mut self, intent: &Intent) {
        let Some(wanted) = intent.single_button().and_then(|b| b.direction()) else {
            return;
        };
        let Some(head) = self.body.cells_mut().first_mut() else {
            return;
        };
        if head.direction.opposite() != Some(wanted) {
            head.direction = wanted;
        }
    }

    fn spawn_food(&mut self, ctx: &mut GameContext) {
        let mut free: ArrayVec<(i32, i32), FIELD_CELLS> = ArrayVec::new();
        for x in 0..FIELD_SIZE {
            for y in 0..FIELD_SIZE {
                if self.is_free(x, y) {
                    free.push((x, y));
                }
            }
        }

        // A full field has nowhere left to place food, so it is cleared.
        if let Some(&(x, y)) = ctx.rng().pick(free.as_slice()) {
            trace!("snake: food at ({}, {})", x, y);
            self.food = Some(Cell::new(x, y, Direction::NONE, FOOD));
        } else {
            trace!("snake: field filled, no food spawned");
            self.food = None;
        }
    }

    fn crawl(&mut self, ctx: &mut GameContext) {
        let Some(&tail) = self.body.last() else {
            return;
        };

        self.body.advance();
        let cells = self.body.cells_mut();
        for i in (1..cells.len()).rev() {
            cells[i].direction = cells[i - 1].direction;
        }

        let ate = match (self.head(), self.food) {
            (Some(head), Some(food)) => *head == food,
            _ => false,
        };
        if ate {
            ctx.add_score(1);
            self.body.push(tail);
            self.spawn_food(ctx);
        }
    }

    fn draw(&self, ctx: &mut GameContext) {
        let grid = ctx.grid_mut();
        grid.clear(BACKGROUND);
        if let Some(food) = &self.food {
            grid.set_cell(food);
        }
        grid.set_cells(&self.body);
        ctx.write_score();
    }
}

impl GameRules for SnakeRules {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn on_new_game(&mut self, ctx: &mut GameContext) {
        let (x, y) = SNAKE_START;
        self.body = Body::from_cells(
            (0..SNAKE_START_LEN as i32)
                .map(|i| {
                    let color = if i == 0 { HEAD } else { SEGMENT };
                    Cell::new(x, y + i, Direction::UP, color)
                })
                .collect(),
        );
        self.food = None;
        self.spawn_food(ctx);
        self.draw(ctx);
    }

    fn on_update_game(&mut self, ctx: &mut GameContext, intent: &Intent) {
        self.steer(intent);

        let Some((x, y)) = self.head().map(Cell::ahead) else {
            return;
        };
        if !self.is_free(x, y) {
            ctx.game_over();
            return;
        }

        self.crawl(ctx);
        self.draw(ctx);
    }
}
