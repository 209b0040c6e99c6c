//! The environment interface consumed by the search engine.

use crate::geom::{Point, Range};

/// A snapshot of one grid cell: its position, world coordinates and
/// traversal weight.
///
/// A weight of zero marks the tile impassable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub row: i32,
    pub col: i32,
    /// World-space x coordinate of the tile center.
    pub x: f32,
    /// World-space y coordinate of the tile center.
    pub y: f32,
    pub weight: f32,
}

impl Tile {
    /// Grid position of the tile.
    #[inline]
    pub fn point(&self) -> Point {
        Point::from_row_col(self.row, self.col)
    }

    /// Whether the tile can be entered.
    #[inline]
    pub fn is_passable(&self) -> bool {
        self.weight != 0.0
    }
}

/// Read access to a rectangular tile environment.
///
/// Rows and columns are zero based. Implementations must return a tile for
/// every in-bounds `(row, col)`.
pub trait TileMap {
    /// Number of rows.
    fn row_count(&self) -> i32;

    /// Number of columns.
    fn column_count(&self) -> i32;

    /// The tile at `(row, col)`, or `None` if out of bounds.
    fn tile(&self, row: i32, col: i32) -> Option<Tile>;

    /// Bounds of the map as a [`Range`] (x = column, y = row).
    fn bounds(&self) -> Range {
        Range::with_extents(self.row_count(), self.column_count())
    }
}

impl<T: TileMap + ?Sized> TileMap for &T {
    fn row_count(&self) -> i32 {
        (**self).row_count()
    }

    fn column_count(&self) -> i32 {
        (**self).column_count()
    }

    fn tile(&self, row: i32, col: i32) -> Option<Tile> {
        (**self).tile(row, col)
    }
}
