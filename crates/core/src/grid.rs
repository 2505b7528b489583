//! Grid module - the shared 20x20 field
//!
//! Every game draws into the same kind of field: a square of [`Color`] values.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where both range 0..19, y growing downwards.
//!
//! Writes outside the field are a contract violation and panic; every rules
//! module validates positions before drawing.

use crate::body::{Body, Cell};
use crate::types::{Color, FIELD_CELLS, FIELD_SIZE};

/// The field - 20 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of colors, row-major order (y * SIZE + x)
    cells: [Color; FIELD_CELLS],
}

impl Grid {
    /// Create a new all-black field
    pub fn new() -> Self {
        Self {
            cells: [Color::Black; FIELD_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (FIELD_SIZE as usize) + (x as usize))
    }

    #[inline(always)]
    fn index_or_panic(x: i32, y: i32) -> usize {
        match Self::index(x, y) {
            Some(idx) => idx,
            None => panic!("grid write out of bounds: ({}, {})", x, y),
        }
    }

    /// Check if position lies on the field
    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..FIELD_SIZE).contains(&x) && (0..FIELD_SIZE).contains(&y)
    }

    /// Get color at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set color at position (x, y)
    ///
    /// # Panics
    ///
    /// If the position is outside the field.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        let idx = Self::index_or_panic(x, y);
        self.cells[idx] = color;
    }

    /// Fill every cell with `color`
    pub fn clear(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// Copy a cell's color to its position
    pub fn set_cell(&mut self, cell: &Cell) {
        self.set(cell.x, cell.y, cell.color);
    }

    /// Copy every cell of a body to the field
    pub fn set_cells(&mut self, body: &Body) {
        for cell in body.iter() {
            self.set_cell(cell);
        }
    }

    /// Rasterize a straight segment between two cells (inclusive).
    ///
    /// The dominant axis advances one cell per step; the other axis advances
    /// proportionally and is rounded to the nearest cell.
    pub fn draw_line(&mut self, color: Color, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());

        self.set(x0, y0, color);
        if steps == 0 {
            return;
        }

        let step_x = dx as f32 / steps as f32;
        let step_y = dy as f32 / steps as f32;
        for i in 1..=steps {
            let x = x0 + (step_x * i as f32).round() as i32;
            let y = y0 + (step_y * i as f32).round() as i32;
            self.set(x, y, color);
        }
    }

    /// Number of cells holding `color`
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// Write color bits into a row-major `[y][x]` grid
    pub fn write_u8_grid(&self, out: &mut [[u8; FIELD_SIZE as usize]; FIELD_SIZE as usize]) {
        let width = FIELD_SIZE as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].bits();
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
