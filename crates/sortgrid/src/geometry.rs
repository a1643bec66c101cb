//! Grid geometry
//!
//! Pure mapping between linear indices and 2-D cell positions, plus the
//! cell-hit test the reorder algorithm uses to decide whether a dragged cell
//! has crossed into a different slot.

use std::ops::{Add, Sub};

/// A 2-D position in logical (content) coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Resolved grid metrics: column count and per-cell size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    columns: usize,
    item_width: f32,
    item_height: f32,
}

impl GridGeometry {
    /// Build from already-validated metrics (see `GridConfig::resolve`)
    pub fn new(columns: usize, item_width: f32, item_height: f32) -> Self {
        Self {
            columns,
            item_width,
            item_height,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Top-left position of the cell at a linear index
    pub fn position_of(&self, index: usize) -> Point {
        Point::new(
            (index % self.columns) as f32 * self.item_width,
            (index / self.columns) as f32 * self.item_height,
        )
    }

    /// Number of rows needed for `len` items
    pub fn rows(&self, len: usize) -> usize {
        len.div_ceil(self.columns)
    }

    /// Total content height for `len` items
    pub fn content_height(&self, len: usize) -> f32 {
        self.rows(len) as f32 * self.item_height
    }

    /// Cell-hit test: the index a cell dragged to `target` (its top-left)
    /// lands on.
    ///
    /// Column and row clamp against `columns`/`rows` rather than
    /// `columns - 1`/`rows - 1`; the trailing `min` against the last index
    /// pins out-of-range hits to the first/last cell.
    pub fn cell_index_at(&self, target: Point, len: usize) -> usize {
        if len == 0 {
            return 0;
        }

        let col = ((target.x + self.item_width / 2.0) / self.item_width).floor();
        let col = (col as isize).clamp(0, self.columns as isize) as usize;

        let row = ((target.y + self.item_height / 2.0) / self.item_height).floor();
        let row = (row as isize).clamp(0, self.rows(len) as isize) as usize;

        (row * self.columns + col).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridGeometry {
        GridGeometry::new(3, 100.0, 100.0)
    }

    #[test]
    fn test_position_of() {
        let g = grid();
        assert_eq!(g.position_of(0), Point::new(0.0, 0.0));
        assert_eq!(g.position_of(2), Point::new(200.0, 0.0));
        assert_eq!(g.position_of(3), Point::new(0.0, 100.0));
        assert_eq!(g.position_of(7), Point::new(100.0, 200.0));
    }

    #[test]
    fn test_rows_and_content_height() {
        let g = grid();
        assert_eq!(g.rows(0), 0);
        assert_eq!(g.rows(3), 1);
        assert_eq!(g.rows(4), 2);
        assert_eq!(g.content_height(7), 300.0);
    }

    #[test]
    fn test_hit_test_round_trip_at_cell_origins() {
        // A cell sitting exactly at its own slot hits its own index.
        for columns in 1..=5 {
            let g = GridGeometry::new(columns, 80.0, 60.0);
            let len = columns * 4;
            for i in 0..len {
                assert_eq!(g.cell_index_at(g.position_of(i), len), i);
            }
        }
    }

    #[test]
    fn test_hit_test_clamps_negative_coordinates() {
        let g = grid();
        assert_eq!(g.cell_index_at(Point::new(-500.0, -500.0), 6), 0);
    }

    #[test]
    fn test_hit_test_pins_past_last_cell() {
        let g = grid();
        // Far past the bottom-right of a 6-item grid
        assert_eq!(g.cell_index_at(Point::new(900.0, 900.0), 6), 5);
    }

    #[test]
    fn test_hit_test_column_clamps_to_column_count() {
        let g = grid();
        // x lands in raw column 5; the clamp bound is `columns` (3), so the
        // row-0 hit resolves to index 3 rather than 2.
        assert_eq!(g.cell_index_at(Point::new(520.0, 0.0), 6), 3);
    }

    #[test]
    fn test_hit_test_empty_grid() {
        assert_eq!(grid().cell_index_at(Point::new(150.0, 150.0), 0), 0);
    }
}
