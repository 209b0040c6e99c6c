//! **hexnav-core**: grid geometry and tile-map environment types.
//!
//! This crate provides the types shared across the *hexnav* workspace:
//! integer geometry ([`Point`], [`Range`]), the [`Tile`] snapshot and
//! [`TileMap`] environment trait consumed by the search engine, and
//! [`TileGrid`], an in-memory hex-offset map that can be parsed from text.

pub mod geom;
pub mod grid;
pub mod tile;

pub use geom::{Point, Range};
pub use grid::{FLOOR, ParseError, TileGrid, WALL};
pub use tile::{Tile, TileMap};
