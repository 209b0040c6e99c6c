//! An in-memory weighted tile grid laid out as pointy-top offset hexes.
//!
//! [`TileGrid`] stores one weight per tile in row-major order and derives
//! tile centers from a hex radius, shifting odd rows right by half a tile.
//! Grids can also be parsed from ASCII art, see [`TileGrid::parse`].

use std::fmt;

use crate::geom::{Point, Range};
use crate::tile::{Tile, TileMap};

/// Weight of an ordinary floor tile.
pub const FLOOR: f32 = 1.0;
/// Weight of an impassable tile.
pub const WALL: f32 = 0.0;

/// A rectangular grid of tile weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    weights: Vec<f32>,
    rows: i32,
    cols: i32,
    radius: f32,
}

impl TileGrid {
    /// Create a `rows` × `cols` grid of floor tiles with hex radius 1.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self::with_radius(rows, cols, 1.0)
    }

    /// Create a `rows` × `cols` grid of floor tiles with the given hex
    /// radius (center to corner).
    pub fn with_radius(rows: i32, cols: i32, radius: f32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            weights: vec![FLOOR; Range::with_extents(rows, cols).len()],
            rows,
            cols,
            radius,
        }
    }

    /// Parse a grid from ASCII art.
    ///
    /// Each line is one row and all lines must have the same width.
    /// Leading and trailing whitespace of the whole string is trimmed.
    /// `#` is a wall, `.` is floor (weight 1) and the digits `1`-`9` give an
    /// explicit weight.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let mut weights = Vec::new();
        let mut cols: i32 = -1;
        let mut rows: i32 = 0;

        for (y, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut x: i32 = 0;
            for ch in line.chars() {
                let w = match ch {
                    '#' => WALL,
                    '.' => FLOOR,
                    '1'..='9' => (ch as u8 - b'0') as f32,
                    _ => {
                        return Err(ParseError::InvalidChar {
                            ch,
                            pos: Point::new(x, y as i32),
                        });
                    }
                };
                weights.push(w);
                x += 1;
            }
            if cols >= 0 && x != cols {
                return Err(ParseError::InconsistentWidth {
                    row: y as i32,
                    expected: cols,
                    found: x,
                });
            }
            cols = x;
            rows += 1;
        }

        Ok(Self {
            weights,
            rows,
            cols: cols.max(0),
            radius: 1.0,
        })
    }

    /// Grid bounds (x = column, y = row).
    pub fn range(&self) -> Range {
        Range::with_extents(self.rows, self.cols)
    }

    /// Hex radius used to compute tile centers.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Weight at `(row, col)`, or `None` if out of bounds.
    pub fn weight(&self, row: i32, col: i32) -> Option<f32> {
        let idx = self.range().index_of(Point::from_row_col(row, col))?;
        Some(self.weights[idx])
    }

    /// Set the weight at `(row, col)`. Does nothing if out of bounds.
    pub fn set_weight(&mut self, row: i32, col: i32, weight: f32) {
        if let Some(idx) = self.range().index_of(Point::from_row_col(row, col)) {
            self.weights[idx] = weight;
        }
    }

    /// Set every tile in the grid using a function of its position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> f32) {
        for p in self.range() {
            if let Some(idx) = self.range().index_of(p) {
                self.weights[idx] = f(p);
            }
        }
    }

    /// World-space center of the tile at `(row, col)`.
    pub fn center(&self, row: i32, col: i32) -> (f32, f32) {
        let width = 3f32.sqrt() * self.radius;
        let offset = if row % 2 == 0 { 0.0 } else { 0.5 };
        let x = width * (col as f32 + 0.5 + offset);
        let y = self.radius * (1.0 + 1.5 * row as f32);
        (x, y)
    }
}

impl TileMap for TileGrid {
    fn row_count(&self) -> i32 {
        self.rows
    }

    fn column_count(&self) -> i32 {
        self.cols
    }

    fn tile(&self, row: i32, col: i32) -> Option<Tile> {
        let weight = self.weight(row, col)?;
        let (x, y) = self.center(row, col);
        Some(Tile {
            row,
            col,
            x,
            y,
            weight,
        })
    }
}

impl fmt::Display for TileGrid {
    /// Renders the grid back to the ASCII form accepted by
    /// [`TileGrid::parse`]. Non-integer weights are rounded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let w = self.weight(row, col).unwrap_or(WALL);
                let ch = if w == WALL {
                    '#'
                } else if w == FLOOR {
                    '.'
                } else {
                    char::from_digit(w.round().clamp(1.0, 9.0) as u32, 10).unwrap_or('?')
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a [`TileGrid`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line's width differs from the first line.
    InconsistentWidth { row: i32, expected: i32, found: i32 },
    /// A character outside `#`, `.` and `1`-`9` was found.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "tile grid: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => write!(
                f,
                "tile grid contains invalid character \u{201c}{ch}\u{201d} at row {}, column {}",
                pos.y, pos.x
            ),
        }
    }
}

impl std::error::Error for ParseError {}
