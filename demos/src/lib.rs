//! Shared helpers for the hexnav demos: random map generation, a
//! frame-driven search loop and ASCII rendering of the route.

use hexnav_core::{FLOOR, Point, Tile, TileGrid, TileMap, WALL};
use hexnav_search::{PathSearch, SearchError, SearchState, SearchStats};
use rand::{Rng, RngExt};

pub const ROWS: i32 = 20;
pub const COLS: i32 = 48;

/// Fill a `rows` × `cols` grid with floor, walls and some heavier terrain.
pub fn random_map(rng: &mut impl Rng, rows: i32, cols: i32) -> TileGrid {
    let mut map = TileGrid::new(rows, cols);
    map.fill_fn(|_| match rng.random_range(0..100u32) {
        0..22 => WALL,
        22..30 => 3.0,
        30..34 => 6.0,
        _ => FLOOR,
    });
    map
}

/// First and last passable tiles in row-major order.
pub fn endpoints(map: &impl TileMap) -> Option<(Point, Point)> {
    let passable = |p: &Point| {
        map.tile(p.row(), p.col())
            .is_some_and(|t| t.is_passable())
    };
    let start = map.bounds().iter().find(passable)?;
    let goal = map.bounds().iter().filter(passable).last()?;
    Some((start, goal))
}

/// Outcome of a completed search.
#[derive(Debug, Clone)]
pub struct Report {
    /// Number of `update` calls it took.
    pub frames: usize,
    /// Route from goal back to start.
    pub route: Vec<Tile>,
    pub stats: SearchStats,
}

/// Call `update(budget_millis)` once per frame until the search is done.
pub fn drive(ps: &mut PathSearch, budget_millis: u64) -> Result<Report, SearchError> {
    let mut frames = 0;
    loop {
        frames += 1;
        if ps.update(budget_millis)? == SearchState::Done {
            break;
        }
    }
    Ok(Report {
        frames,
        route: ps.solution()?,
        stats: ps.stats(),
    })
}

/// Draw the map with odd rows indented half a cell. Route tiles are `*`,
/// the start `S` and the goal `G`.
pub fn render(map: &TileGrid, route: &[Tile]) -> String {
    let on_route = |p: Point| route.iter().position(|t| t.point() == p);
    let mut out = String::new();
    for row in 0..map.row_count() {
        if row % 2 == 1 {
            out.push(' ');
        }
        for col in 0..map.column_count() {
            let p = Point::from_row_col(row, col);
            let ch = match on_route(p) {
                Some(0) => 'G',
                Some(i) if i + 1 == route.len() => 'S',
                Some(_) => '*',
                None => match map.weight(row, col) {
                    Some(w) if w == WALL => '#',
                    Some(w) if w == FLOOR => '.',
                    Some(_) => '~',
                    None => ' ',
                },
            };
            out.push(ch);
            if col + 1 < map.column_count() {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}
