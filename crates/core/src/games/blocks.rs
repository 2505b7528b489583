//! Blocks - falling four-cell shapes stacked into rows
//!
//! The left half of the field (columns 0..9) is the play column; the right
//! half shows the next shape. Shapes fall one row every other tick, can be
//! shifted, rotated clockwise, or pushed down two rows at once. A shape that
//! cannot fall further joins the settled mass; every complete row of ten
//! settled cells is removed and scores a point.

use log::trace;

use crate::body::Body;
use crate::engine::{GameContext, GameRules};
use crate::rng::SimpleRng;
use crate::types::{
    Button, Color, Direction, GameKind, Intent, BLOCKS_PREVIEW, BLOCKS_SPAWN, FIELD_SIZE,
    PLAY_WIDTH,
};

const BACKGROUND: Color = Color::White;
const DIVIDER: Color = Color::Green;

/// Relative cell offsets of one shape
pub type Stamp = [(i32, i32); 4];

/// The seven shapes, in their spawn orientation
pub const STAMPS: [Stamp; 7] = [
    // I (vertical)
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    // T
    [(0, 1), (1, 1), (2, 1), (1, 0)],
    // O
    [(0, 0), (1, 1), (0, 1), (1, 0)],
    // L
    [(0, 0), (1, 0), (0, 1), (0, 2)],
    // J
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    // Z
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    // S
    [(2, 0), (1, 0), (1, 1), (0, 1)],
];

/// Instantiate a stamp falling downwards in `color`, anchored at (x, y)
pub fn shape(stamp: &Stamp, color: Color, x: i32, y: i32) -> Body {
    let mut body = Body::from_offsets(stamp, Direction::DOWN, color);
    body.set_origin(x, y);
    body
}

/// Random stamp in a random color, anchored at the preview position
pub fn random_shape(rng: &mut SimpleRng) -> Body {
    let stamp = STAMPS[rng.next_range(STAMPS.len() as u32) as usize];
    let color = Color::SHAPE_PALETTE[rng.next_range(Color::SHAPE_PALETTE.len() as u32) as usize];
    let (x, y) = BLOCKS_PREVIEW;
    shape(&stamp, color, x, y)
}

/// Remove every complete row of the settled mass, returning how many went.
///
/// Rows are scanned bottom-up. After a clear the same row index is tested
/// again, since the rows above have just shifted into it. The scan ends above
/// the topmost settled cell.
pub fn clear_full_rows(settled: &mut Body) -> u32 {
    let mut cleared = 0;
    let mut y = FIELD_SIZE - 1;
    while let Some(top) = settled.min_y() {
        if y < top {
            break;
        }
        if settled.count_row(y) != PLAY_WIDTH as usize {
            y -= 1;
            continue;
        }

        settled.retain(|c| c.y != y);
        for cell in settled.cells_mut() {
            if cell.y < y {
                cell.y += 1;
            }
        }
        trace!("blocks: cleared row {}", y);
        cleared += 1;
    }
    cleared
}

#[derive(Debug, Clone, Default)]
pub struct BlockStackRules {
    active: Body,
    settled: Body,
    preview: Body,
    /// Gravity applies on ticks where this flips to true.
    gravity_phase: bool,
}

impl BlockStackRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The falling shape
    pub fn active(&self) -> &Body {
        &self.active
    }

    /// Landed cells
    pub fn settled(&self) -> &Body {
        &self.settled
    }

    /// The shape that spawns next
    pub fn preview(&self) -> &Body {
        &self.preview
    }

    /// Shape lies inside the play column and clear of the settled mass
    fn fits(&self, candidate: &Body) -> bool {
        let (Some((min_x, min_y)), Some(max_x), Some(max_y)) =
            (candidate.origin(), candidate.max_x(), candidate.max_y())
        else {
            return false;
        };
        min_x >= 0
            && max_x < PLAY_WIDTH
            && min_y >= 0
            && max_y < FIELD_SIZE
            && !self.settled.intersects(candidate)
    }

    fn try_rotate(&mut self) -> bool {
        let mut rotated = self.active.clone();
        rotated.rotate_cw();
        if !self.fits(&rotated) {
            return false;
        }
        self.active = rotated;
        true
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        let mut shifted = self.active.clone();
        shifted.translate(dx, 0);
        if !self.fits(&shifted) {
            return false;
        }
        self.active = shifted;
        true
    }

    /// Preview becomes active at the spawn point; a fresh preview is drawn.
    fn spawn(&mut self, ctx: &mut GameContext) {
        let next = random_shape(ctx.rng());
        self.active = std::mem::replace(&mut self.preview, next);
        let (x, y) = BLOCKS_SPAWN;
        self.active.set_origin(x, y);
    }

    fn topped_out(&self) -> bool {
        self.settled.intersects(&self.active)
    }

    /// One row of gravity: fall, or land and spawn the next shape.
    ///
    /// Returns false once a fresh shape spawns on top of the settled mass.
    fn gravity_step(&mut self, ctx: &mut GameContext) -> bool {
        if self.topped_out() {
            return false;
        }

        let mut fallen = self.active.clone();
        fallen.advance();
        let hits_floor = fallen.max_y().is_some_and(|y| y >= FIELD_SIZE);
        if !hits_floor && !self.settled.intersects(&fallen) {
            self.active = fallen;
            return true;
        }

        self.settled.join(&self.active);
        let cleared = clear_full_rows(&mut self.settled);
        ctx.add_score(cleared);
        self.spawn(ctx);
        !self.topped_out()
    }

    fn draw(&self, ctx: &mut GameContext) {
        let grid = ctx.grid_mut();
        grid.clear(BACKGROUND);
        grid.draw_line(DIVIDER, PLAY_WIDTH, 0, PLAY_WIDTH, FIELD_SIZE - 1);
        grid.set_cells(&self.settled);
        grid.set_cells(&self.active);
        grid.set_cells(&self.preview);
        ctx.write_score();
    }
}

impl GameRules for BlockStackRules {
    fn kind(&self) -> GameKind {
        GameKind::Blocks
    }

    fn on_new_game(&mut self, ctx: &mut GameContext) {
        self.gravity_phase = false;
        self.settled = Body::new();
        self.preview = random_shape(ctx.rng());
        self.spawn(ctx);
        self.draw(ctx);
    }

    fn on_update_game(&mut self, ctx: &mut GameContext, intent: &Intent) {
        let mut falling = true;
        match intent.single_button() {
            Some(Button::Up) => {
                self.try_rotate();
            }
            Some(Button::Down) => {
                falling = self.gravity_step(ctx) && self.gravity_step(ctx);
            }
            Some(Button::Left) => {
                self.try_shift(-1);
            }
            Some(Button::Right) => {
                self.try_shift(1);
            }
            _ => {}
        }

        self.gravity_phase = !self.gravity_phase;
        if falling && self.gravity_phase {
            self.gravity_step(ctx);
        }

        self.draw(ctx);
        if self.topped_out() {
            ctx.game_over();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Cell;
    use crate::engine::GameEngine;
    use crate::types::GameStatus;

    fn positions(body: &Body) -> Vec<(i32, i32)> {
        let mut out: Vec<(i32, i32)> = body.iter().map(|c| c.position()).collect();
        out.sort();
        out
    }

    fn row(y: i32, xs: impl Iterator<Item = i32>) -> Vec<Cell> {
        xs.map(|x| Cell::new(x, y, Direction::DOWN, Color::Red)).collect()
    }

    fn started(seed: u32) -> GameEngine<BlockStackRules> {
        let mut engine = GameEngine::new(BlockStackRules::new(), seed);
        engine.new_game();
        engine
    }

    #[test]
    fn test_stamps_have_four_distinct_cells_at_origin() {
        for stamp in &STAMPS {
            let body = shape(stamp, Color::Blue, 0, 0);
            let mut cells = positions(&body);
            cells.dedup();
            assert_eq!(cells.len(), 4);
            assert_eq!(body.origin(), Some((0, 0)));
        }
    }

    #[test]
    fn test_four_rotations_restore_every_stamp() {
        for stamp in &STAMPS {
            let original = shape(stamp, Color::Cyan, 4, 6);
            let mut body = original.clone();
            for _ in 0..4 {
                body.rotate_cw();
                assert_eq!(body.origin(), Some((4, 6)));
            }
            assert_eq!(positions(&body), positions(&original));
        }
    }

    #[test]
    fn test_new_game_spawns_active_and_preview() {
        let engine = started(5);
        let rules = engine.rules();
        assert_eq!(rules.active().origin(), Some(BLOCKS_SPAWN));
        assert_eq!(rules.preview().origin(), Some(BLOCKS_PREVIEW));
        assert!(rules.settled().is_empty());
        assert!(rules.active().iter().all(|c| c.direction == Direction::DOWN));

        for y in 0..FIELD_SIZE {
            assert_eq!(engine.grid().get(PLAY_WIDTH, y), Some(DIVIDER));
        }
        assert_eq!(engine.info_label(), "Score: 0");
    }

    #[test]
    fn test_gravity_applies_every_other_tick() {
        let mut engine = started(5);
        let y0 = engine.rules().active().origin().unwrap().1;

        engine.update(&Intent::none());
        assert_eq!(engine.rules().active().origin().unwrap().1, y0 + 1);
        engine.update(&Intent::none());
        assert_eq!(engine.rules().active().origin().unwrap().1, y0 + 1);
        engine.update(&Intent::none());
        assert_eq!(engine.rules().active().origin().unwrap().1, y0 + 2);
    }

    #[test]
    fn test_down_adds_two_rows_on_top_of_gravity() {
        let mut engine = started(5);
        let y0 = engine.rules().active().origin().unwrap().1;

        engine.update(&Intent::press(Button::Down));
        assert_eq!(engine.rules().active().origin().unwrap().1, y0 + 3);
        engine.update(&Intent::press(Button::Down));
        assert_eq!(engine.rules().active().origin().unwrap().1, y0 + 5);
    }

    #[test]
    fn test_shift_stops_at_walls_and_divider() {
        let mut engine = started(5);
        for _ in 0..12 {
            engine.update(&Intent::press(Button::Left));
        }
        assert_eq!(engine.rules().active().origin().unwrap().0, 0);

        for _ in 0..12 {
            engine.update(&Intent::press(Button::Right));
        }
        assert_eq!(engine.rules().active().max_x(), Some(PLAY_WIDTH - 1));
    }

    #[test]
    fn test_shift_blocked_by_settled_mass() {
        let mut engine = started(5);
        let (rules, _) = engine.parts_mut();
        rules.active = shape(&STAMPS[2], Color::Blue, 4, 5);
        rules.settled = Body::from_cells(vec![Cell::new(6, 5, Direction::DOWN, Color::Red)]);
        assert!(!rules.try_shift(1));
        assert!(rules.try_shift(-1));
        assert_eq!(rules.active().origin(), Some((3, 5)));
    }

    #[test]
    fn test_rotation_rejected_at_divider() {
        let mut engine = started(5);
        let (rules, _) = engine.parts_mut();
        // Vertical bar against the divider would rotate into columns 9..12.
        rules.active = shape(&STAMPS[0], Color::Blue, 9, 5);
        assert!(!rules.try_rotate());
        assert_eq!(rules.active().origin(), Some((9, 5)));

        rules.active = shape(&STAMPS[0], Color::Blue, 4, 5);
        assert!(rules.try_rotate());
        assert_eq!(positions(rules.active()), vec![(4, 5), (5, 5), (6, 5), (7, 5)]);
    }

    #[test]
    fn test_rotation_rejected_into_settled_mass() {
        let mut engine = started(5);
        let (rules, _) = engine.parts_mut();
        rules.active = shape(&STAMPS[0], Color::Blue, 2, 5);
        rules.settled = Body::from_cells(vec![Cell::new(4, 5, Direction::DOWN, Color::Red)]);
        let before = positions(rules.active());

        assert!(!rules.try_rotate());
        assert_eq!(positions(rules.active()), before);
    }

    #[test]
    fn test_rotation_rejected_below_floor() {
        let mut engine = started(5);
        let (rules, _) = engine.parts_mut();
        // Horizontal bar on the bottom row would rotate into rows 19..22.
        let mut bar = shape(&STAMPS[0], Color::Blue, 0, 0);
        bar.rotate_cw();
        bar.set_origin(3, 19);
        rules.active = bar;
        let before = positions(rules.active());

        assert!(!rules.try_rotate());
        assert_eq!(positions(rules.active()), before);

        // A square on the floor rotates in place.
        rules.active = shape(&STAMPS[2], Color::Blue, 3, 18);
        assert!(rules.try_rotate());
        assert_eq!(rules.active().max_y(), Some(FIELD_SIZE - 1));
    }

    #[test]
    fn test_landing_joins_mass_and_spawns_preview() {
        let mut engine = started(5);
        let (rules, ctx) = engine.parts_mut();
        rules.active = shape(&STAMPS[2], Color::Blue, 0, 18);
        let next = rules.preview().clone();

        assert!(rules.gravity_step(ctx));
        assert_eq!(positions(rules.settled()), vec![(0, 18), (0, 19), (1, 18), (1, 19)]);

        let mut expected = next;
        expected.set_origin(BLOCKS_SPAWN.0, BLOCKS_SPAWN.1);
        assert_eq!(positions(rules.active()), positions(&expected));
        assert_eq!(rules.preview().origin(), Some(BLOCKS_PREVIEW));
    }

    #[test]
    fn test_clear_full_row_shifts_cells_above() {
        let mut settled = Body::from_cells(row(19, 0..10));
        settled.push(Cell::new(3, 18, Direction::DOWN, Color::Blue));
        settled.push(Cell::new(7, 10, Direction::DOWN, Color::Blue));

        assert_eq!(clear_full_rows(&mut settled), 1);
        assert_eq!(positions(&settled), vec![(3, 19), (7, 11)]);
    }

    #[test]
    fn test_rows_with_nine_or_eleven_cells_stay() {
        let mut nine = Body::from_cells(row(19, 0..9));
        assert_eq!(clear_full_rows(&mut nine), 0);
        assert_eq!(nine.len(), 9);

        let mut eleven = Body::from_cells(row(19, 0..10));
        eleven.push(Cell::new(4, 19, Direction::DOWN, Color::Blue));
        assert_eq!(clear_full_rows(&mut eleven), 0);
        assert_eq!(eleven.len(), 11);
    }

    #[test]
    fn test_stacked_full_rows_clear_at_same_index() {
        let mut cells = row(19, 0..10);
        cells.extend(row(18, 0..10));
        cells.extend(row(17, 0..4));
        let mut settled = Body::from_cells(cells);

        assert_eq!(clear_full_rows(&mut settled), 2);
        assert_eq!(settled.len(), 4);
        assert!(settled.iter().all(|c| c.y == 19));
    }

    #[test]
    fn test_clearing_everything_ends_scan() {
        let mut settled = Body::from_cells(row(19, 0..10));
        assert_eq!(clear_full_rows(&mut settled), 1);
        assert!(settled.is_empty());
    }

    #[test]
    fn test_line_clear_scores_through_engine() {
        let mut engine = started(5);
        {
            let (rules, _) = engine.parts_mut();
            // Bottom row missing columns 0 and 1; an O piece fills them.
            let mut cells = row(19, 2..10);
            cells.extend(row(18, 2..10));
            rules.settled = Body::from_cells(cells);
            rules.active = shape(&STAMPS[2], Color::Blue, 0, 17);
            rules.gravity_phase = false;
        }

        // Gravity drops the O to rows 18..19, next gravity lands it.
        engine.update(&Intent::none());
        engine.update(&Intent::none());
        engine.update(&Intent::none());
        assert_eq!(engine.score(), 2);
        assert!(engine.rules().settled().is_empty());
        assert_eq!(engine.info_label(), "Score: 2");
    }

    #[test]
    fn test_spawn_on_settled_mass_ends_game() {
        let mut engine = started(5);
        {
            let (rules, _) = engine.parts_mut();
            let cells = (0..FIELD_SIZE)
                .flat_map(|y| row(y, 4..8))
                .filter(|c| c.y > 0)
                .collect();
            rules.settled = Body::from_cells(cells);
            rules.active = shape(&STAMPS[2], Color::Blue, 0, 18);
            rules.gravity_phase = false;
        }

        engine.update(&Intent::none());
        engine.update(&Intent::none());
        engine.update(&Intent::none());
        assert_eq!(engine.status(), GameStatus::Over);
        assert!(engine.take_game_over());
        assert_eq!(engine.info_label(), "Game over. Score: 0");
    }
}
