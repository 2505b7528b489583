//! Body module - movable cells and rigid multi-cell shapes
//!
//! A [`Cell`] is one field position carrying a motion direction and a color.
//! A [`Body`] is an ordered list of cells moved as a unit. Its origin is the
//! bounding corner (min x, min y).
//!
//! Cell equality compares positions only, so collision tests never depend on
//! how a cell is painted or where it is heading.

use crate::types::{Color, Direction};

/// A single addressable field position with motion and color
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub color: Color,
}

impl Cell {
    pub fn new(x: i32, y: i32, direction: Direction, color: Color) -> Self {
        Self {
            x,
            y,
            direction,
            color,
        }
    }

    /// A bare position, for collision queries
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, Direction::NONE, Color::Black)
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Position one step ahead along the cell's direction
    pub fn ahead(&self) -> (i32, i32) {
        let (dx, dy) = self.direction.delta();
        (self.x + dx, self.y + dy)
    }

    /// Advance one step along the cell's direction
    pub fn step(&mut self) {
        (self.x, self.y) = self.ahead();
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Cell {}

/// Rigid ordered collection of cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    cells: Vec<Cell>,
}

impl Body {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a body from relative offsets sharing one direction and color
    pub fn from_offsets(offsets: &[(i32, i32)], direction: Direction, color: Color) -> Self {
        Self {
            cells: offsets
                .iter()
                .map(|&(x, y)| Cell::new(x, y, direction, color))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn first(&self) -> Option<&Cell> {
        self.cells.first()
    }

    pub fn last(&self) -> Option<&Cell> {
        self.cells.last()
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Bounding origin (min x, min y); `None` for an empty body
    pub fn origin(&self) -> Option<(i32, i32)> {
        let min_x = self.cells.iter().map(|c| c.x).min()?;
        let min_y = self.cells.iter().map(|c| c.y).min()?;
        Some((min_x, min_y))
    }

    pub fn max_x(&self) -> Option<i32> {
        self.cells.iter().map(|c| c.x).max()
    }

    pub fn max_y(&self) -> Option<i32> {
        self.cells.iter().map(|c| c.y).max()
    }

    pub fn min_y(&self) -> Option<i32> {
        self.cells.iter().map(|c| c.y).min()
    }

    /// Translate so the origin lands on (x, y). No-op for an empty body.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        if let Some((ox, oy)) = self.origin() {
            self.translate(x - ox, y - oy);
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        for cell in &mut self.cells {
            cell.x += dx;
            cell.y += dy;
        }
    }

    /// Advance every cell one step along its own direction
    pub fn advance(&mut self) {
        for cell in &mut self.cells {
            cell.step();
        }
    }

    /// Append the cells of `other`
    pub fn join(&mut self, other: &Body) {
        self.cells.extend_from_slice(&other.cells);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.iter().any(|c| c.x == x && c.y == y)
    }

    /// True iff any position is shared with `other`
    pub fn intersects(&self, other: &Body) -> bool {
        other.cells.iter().any(|c| self.cells.contains(c))
    }

    /// Number of cells on row `y`
    pub fn count_row(&self, y: i32) -> usize {
        self.cells.iter().filter(|c| c.y == y).count()
    }

    pub fn retain(&mut self, f: impl FnMut(&Cell) -> bool) {
        self.cells.retain(f);
    }

    /// Rotate 90 degrees clockwise (screen coordinates) about the origin,
    /// keeping the origin in place.
    pub fn rotate_cw(&mut self) {
        let Some((left, top)) = self.origin() else {
            return;
        };
        self.set_origin(0, 0);
        for cell in &mut self.cells {
            (cell.x, cell.y) = (-cell.y, cell.x);
        }
        self.set_origin(left, top);
    }
}
