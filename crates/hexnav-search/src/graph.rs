use std::time::Instant;

use hexnav_core::{Point, Range, Tile, TileMap};

use crate::error::SearchError;
use crate::neighbors::Neighbors;

/// Identity of a cell within a [`NavGraph`]: its row-major index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub(crate) u32);

impl CellId {
    /// Row-major index of the cell.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Persistent per-cell record: a snapshot of the tile taken at build time
/// and the cached list of traversable neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    tile: Tile,
    neighbors: Vec<CellId>,
}

impl GraphNode {
    #[inline]
    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Traversal weight copied from the tile when the graph was built.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.tile.weight
    }

    #[inline]
    pub fn point(&self) -> Point {
        self.tile.point()
    }

    /// Neighbors in row-major order. Never contains impassable cells.
    #[inline]
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
}

/// Navigation graph over a tile map: one [`GraphNode`] per cell.
///
/// Adjacency is computed once by [`build`](Self::build) and never
/// recomputed. The graph is read-only afterwards and can be shared by any
/// number of search sessions.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    rng: Range,
    nodes: Vec<GraphNode>,
}

impl NavGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `map`.
    pub fn from_map<M: TileMap + ?Sized>(map: &M) -> Result<Self, SearchError> {
        let mut g = Self::new();
        g.build(map)?;
        Ok(g)
    }

    /// Replace the graph contents with nodes built from `map`.
    ///
    /// Any previous graph is torn down first. On error the graph is left
    /// empty.
    pub fn build<M: TileMap + ?Sized>(&mut self, map: &M) -> Result<(), SearchError> {
        self.teardown();
        let started = Instant::now();
        let rng = map.bounds();

        let mut tiles = Vec::with_capacity(rng.len());
        for p in rng {
            let (row, col) = (p.row(), p.col());
            let tile = map
                .tile(row, col)
                .ok_or(SearchError::MissingTile { row, col })?;
            if !tile.weight.is_finite() || tile.weight < 0.0 {
                return Err(SearchError::InvalidWeight {
                    row,
                    col,
                    weight: tile.weight,
                });
            }
            tiles.push(Tile { row, col, ..tile });
        }

        let mut nb = Neighbors::new();
        let mut edges = 0;
        let mut nodes = Vec::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            let p = rng.point_at(i);
            let neighbors: Vec<CellId> = nb
                .staggered(p, |n| {
                    rng.index_of(n)
                        .is_some_and(|ni| tiles[ni].is_passable())
                })
                .iter()
                .filter_map(|&n| rng.index_of(n))
                .map(|ni| CellId(ni as u32))
                .collect();
            edges += neighbors.len();
            nodes.push(GraphNode {
                tile: *tile,
                neighbors,
            });
        }

        log::debug!(
            "built navigation graph {rng}: {} nodes, {edges} edges in {:?}",
            nodes.len(),
            started.elapsed()
        );
        self.rng = rng;
        self.nodes = nodes;
        Ok(())
    }

    /// Release every node.
    pub fn teardown(&mut self) {
        self.nodes = Vec::new();
        self.rng = Range::default();
    }

    /// Number of nodes (one per cell).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounds of the grid the graph was built from.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Cell at `(row, col)`, or `None` if out of bounds.
    #[inline]
    pub fn id(&self, row: i32, col: i32) -> Option<CellId> {
        self.id_at(Point::from_row_col(row, col))
    }

    /// Cell at grid position `p`, or `None` if out of bounds.
    #[inline]
    pub fn id_at(&self, p: Point) -> Option<CellId> {
        self.rng.index_of(p).map(|i| CellId(i as u32))
    }

    /// Node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn node(&self, id: CellId) -> &GraphNode {
        &self.nodes[id.index()]
    }

    /// Node at `(row, col)`, or `None` if out of bounds.
    #[inline]
    pub fn node_at(&self, row: i32, col: i32) -> Option<&GraphNode> {
        self.id(row, col).map(|id| self.node(id))
    }

    /// Iterate over `(CellId, &GraphNode)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &GraphNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (CellId(i as u32), n))
    }

    /// Whether `to` is listed among the neighbors of `from`.
    pub fn is_neighbor(&self, from: CellId, to: CellId) -> bool {
        self.nodes
            .get(from.index())
            .is_some_and(|n| n.neighbors.contains(&to))
    }
}
