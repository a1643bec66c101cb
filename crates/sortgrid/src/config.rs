//! Grid configuration and validation
//!
//! The host supplies column count, viewport width, and optionally explicit
//! cell dimensions. Unspecified dimensions fall back to square cells sized
//! `viewport_width / columns`. Degenerate metrics are rejected up front
//! rather than allowed to reach the geometry math.

use thiserror::Error;

use crate::geometry::GridGeometry;

/// Configuration contract violations
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("column count must be at least 1 (got {0})")]
    InvalidColumns(usize),
    #[error("item size must be positive (got {width}x{height})")]
    InvalidItemSize { width: f32, height: f32 },
    #[error("viewport width must be positive to derive cell size (got {0})")]
    InvalidViewportWidth(f32),
}

/// Host-supplied grid configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Number of columns (>= 1)
    pub columns: usize,
    /// Total viewport width, used to derive default cell size
    pub viewport_width: f32,
    /// Explicit cell width; defaults to `viewport_width / columns`
    pub item_width: Option<f32>,
    /// Explicit cell height; defaults to the resolved width (square cells)
    pub item_height: Option<f32>,
}

impl GridConfig {
    pub fn new(columns: usize, viewport_width: f32) -> Self {
        Self {
            columns,
            viewport_width,
            item_width: None,
            item_height: None,
        }
    }

    /// Set explicit cell dimensions
    pub fn item_size(mut self, width: f32, height: f32) -> Self {
        self.item_width = Some(width);
        self.item_height = Some(height);
        self
    }

    /// Validate and resolve into concrete grid metrics
    pub fn resolve(&self) -> Result<GridGeometry, GridError> {
        if self.columns == 0 {
            return Err(GridError::InvalidColumns(self.columns));
        }
        if self.item_width.is_none() && !(self.viewport_width > 0.0) {
            return Err(GridError::InvalidViewportWidth(self.viewport_width));
        }

        let width = self
            .item_width
            .unwrap_or(self.viewport_width / self.columns as f32);
        let height = self.item_height.unwrap_or(width);

        if !(width > 0.0) || !(height > 0.0) {
            return Err(GridError::InvalidItemSize { width, height });
        }

        Ok(GridGeometry::new(self.columns, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_square_cells_from_viewport() {
        let g = GridConfig::new(4, 400.0).resolve().unwrap();
        assert_eq!(g.columns(), 4);
        assert_eq!(g.item_width(), 100.0);
        assert_eq!(g.item_height(), 100.0);
    }

    #[test]
    fn test_explicit_item_size_wins() {
        let g = GridConfig::new(3, 300.0)
            .item_size(80.0, 60.0)
            .resolve()
            .unwrap();
        assert_eq!(g.item_width(), 80.0);
        assert_eq!(g.item_height(), 60.0);
    }

    #[test]
    fn test_zero_columns_rejected() {
        assert_eq!(
            GridConfig::new(0, 300.0).resolve(),
            Err(GridError::InvalidColumns(0))
        );
    }

    #[test]
    fn test_nonpositive_item_size_rejected() {
        let err = GridConfig::new(3, 300.0)
            .item_size(-10.0, 50.0)
            .resolve()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidItemSize { .. }));
    }

    #[test]
    fn test_zero_viewport_without_explicit_size_rejected() {
        assert_eq!(
            GridConfig::new(3, 0.0).resolve(),
            Err(GridError::InvalidViewportWidth(0.0))
        );
        // Explicit size does not need the viewport width
        assert!(GridConfig::new(3, 0.0).item_size(50.0, 50.0).resolve().is_ok());
    }
}
