use std::collections::HashMap;

use hexnav_core::{Point, Range};

use crate::config::SearchConfig;
use crate::distance::euclidean;
use crate::error::SearchError;
use crate::graph::{CellId, NavGraph};
use crate::queue::PriorityQueue;

/// Handle to a [`PlannerNode`] in a session's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

impl From<NodeHandle> for usize {
    #[inline]
    fn from(h: NodeHandle) -> usize {
        h.0 as usize
    }
}

impl From<usize> for NodeHandle {
    #[inline]
    fn from(i: usize) -> Self {
        NodeHandle(i as u32)
    }
}

/// Per-session search state for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerNode {
    pub(crate) cell: CellId,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) heuristic: f32,
    pub(crate) given: f32,
    pub(crate) final_cost: f32,
}

impl PlannerNode {
    /// The cell this node plans for.
    #[inline]
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// The node this one was reached from; `None` for the start.
    #[inline]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Estimated remaining cost to the goal.
    #[inline]
    pub fn heuristic_cost(&self) -> f32 {
        self.heuristic
    }

    /// Best known accumulated cost from the start.
    #[inline]
    pub fn given_cost(&self) -> f32 {
        self.given
    }

    /// Open-set priority: `given + heuristic_weight * heuristic`.
    #[inline]
    pub fn final_cost(&self) -> f32 {
        self.final_cost
    }
}

/// Counters collected over one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped from the open set and relaxed.
    pub expansions: usize,
    /// Planner nodes created, the start included.
    pub discovered: usize,
    /// Cheaper paths found to already discovered nodes.
    pub improvements: usize,
    /// Improvements that pulled an already expanded node back into the
    /// open set.
    pub reopened: usize,
    /// Scheduler calls that did any work.
    pub ticks: usize,
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Not initialized, or torn down.
    Idle,
    /// Frontier is non-empty and the goal has not been reached.
    InProgress,
    /// The goal was reached; a solution is available.
    Done,
    /// The frontier ran dry without reaching the goal.
    Unreachable,
}

/// An incremental A* query against a [`NavGraph`].
///
/// The session owns every [`PlannerNode`] it creates in an arena; parents
/// are [`NodeHandle`]s into that arena. The graph is passed to each call and
/// must be the one the session was initialized against.
#[derive(Debug, Clone, Default)]
pub struct Search {
    pub(crate) config: SearchConfig,
    pub(crate) nodes: Vec<PlannerNode>,
    pub(crate) visited: HashMap<CellId, NodeHandle>,
    pub(crate) open: PriorityQueue<NodeHandle>,
    pub(crate) start: Option<CellId>,
    pub(crate) goal: Option<CellId>,
    /// Bounds of the graph passed to `initialize`.
    pub(crate) bounds: Range,
    pub(crate) terminal: Option<NodeHandle>,
    pub(crate) done: bool,
    pub(crate) stats: SearchStats,
}

impl Search {
    /// Create an idle session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle session with `config`.
    pub fn with_config(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Start a new search from `start` to `goal` (x = column, y = row).
    ///
    /// Both cells are validated before any state changes; on success any
    /// previous search is discarded.
    pub fn initialize(
        &mut self,
        graph: &NavGraph,
        start: Point,
        goal: Point,
    ) -> Result<(), SearchError> {
        if graph.is_empty() {
            return Err(SearchError::NotLoaded);
        }
        let start_id = passable_cell(graph, start)?;
        let goal_id = passable_cell(graph, goal)?;

        self.teardown();

        let heuristic = euclidean(graph.node(start_id).tile(), graph.node(goal_id).tile());
        self.insert(PlannerNode {
            cell: start_id,
            parent: None,
            heuristic,
            given: 0.0,
            final_cost: heuristic * self.config.heuristic_weight,
        });
        self.start = Some(start_id);
        self.bounds = graph.range();
        self.goal = Some(goal_id);
        log::debug!("search initialized: {start} -> {goal}, estimate {heuristic:.2}");
        Ok(())
    }

    /// Drop all planner nodes and the open set. The graph is untouched.
    pub fn teardown(&mut self) {
        self.open.clear();
        self.visited.clear();
        self.nodes.clear();
        self.start = None;
        self.goal = None;
        self.bounds = Range::default();
        self.terminal = None;
        self.done = false;
        self.stats = SearchStats::default();
    }

    /// Whether the goal has been reached. Stays true until the next
    /// [`initialize`](Self::initialize).
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn state(&self) -> SearchState {
        if self.done {
            SearchState::Done
        } else if self.goal.is_none() {
            SearchState::Idle
        } else if self.open.is_empty() {
            SearchState::Unreachable
        } else {
            SearchState::InProgress
        }
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<CellId> {
        self.goal
    }

    /// Number of cells discovered so far.
    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Number of nodes waiting in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Planner node for `cell`, if it has been discovered.
    pub fn planner_node(&self, cell: CellId) -> Option<&PlannerNode> {
        self.visited.get(&cell).map(|&h| self.node(h))
    }

    /// Planner node behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` comes from another session or a torn down one.
    #[inline]
    pub fn node(&self, handle: NodeHandle) -> &PlannerNode {
        &self.nodes[usize::from(handle)]
    }

    /// Iterate over all discovered planner nodes in discovery order.
    pub fn planner_nodes(&self) -> impl Iterator<Item = &PlannerNode> + '_ {
        self.nodes.iter()
    }

    /// Whether `cell` is waiting in the open set.
    pub fn is_open(&self, cell: CellId) -> bool {
        self.visited
            .get(&cell)
            .is_some_and(|&h| self.open.contains(h))
    }

    /// Fail unless `graph` has the bounds recorded by `initialize`.
    pub(crate) fn check_graph(&self, graph: &NavGraph) -> Result<(), SearchError> {
        if graph.range() != self.bounds {
            return Err(SearchError::GraphMismatch);
        }
        Ok(())
    }

    /// Add a node to the arena, the visited map and the open set.
    pub(crate) fn insert(&mut self, node: PlannerNode) -> NodeHandle {
        let handle = NodeHandle::from(self.nodes.len());
        self.visited.insert(node.cell, handle);
        self.open.push(handle, node.final_cost);
        self.nodes.push(node);
        self.stats.discovered += 1;
        handle
    }
}

/// Resolve `p` to a passable cell of `graph`.
fn passable_cell(graph: &NavGraph, p: Point) -> Result<CellId, SearchError> {
    let invalid = SearchError::InvalidCoordinate {
        row: p.row(),
        col: p.col(),
    };
    let id = graph.id_at(p).ok_or_else(|| invalid.clone())?;
    if !graph.node(id).tile().is_passable() {
        return Err(invalid);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexnav_core::{TileGrid, WALL};

    fn graph(rows: i32, cols: i32) -> NavGraph {
        NavGraph::from_map(&TileGrid::new(rows, cols)).unwrap()
    }

    #[test]
    fn initialize_seeds_start_node() {
        let g = graph(3, 3);
        let mut s = Search::new();
        s.initialize(&g, Point::from_row_col(0, 0), Point::from_row_col(2, 2))
            .unwrap();
        assert_eq!(s.visited_len(), 1);
        assert_eq!(s.open_len(), 1);
        let start = s.planner_node(g.id(0, 0).unwrap()).unwrap();
        assert_eq!(start.given_cost(), 0.0);
        assert_eq!(start.parent(), None);
        let expected = euclidean(g.node_at(0, 0).unwrap().tile(), g.node_at(2, 2).unwrap().tile());
        assert_eq!(start.heuristic_cost(), expected);
        assert_eq!(start.final_cost(), expected * 0.5);
        assert_eq!(s.state(), SearchState::InProgress);
        assert_eq!(s.stats().discovered, 1);
    }

    #[test]
    fn initialize_requires_loaded_graph() {
        let mut s = Search::new();
        let err = s
            .initialize(&NavGraph::new(), Point::ZERO, Point::ZERO)
            .unwrap_err();
        assert_eq!(err, SearchError::NotLoaded);
        assert_eq!(s.state(), SearchState::Idle);
    }

    #[test]
    fn invalid_coordinates_leave_state_alone() {
        let mut map = TileGrid::new(3, 3);
        map.set_weight(1, 1, WALL);
        let g = NavGraph::from_map(&map).unwrap();
        let mut s = Search::new();
        s.initialize(&g, Point::from_row_col(0, 0), Point::from_row_col(2, 2))
            .unwrap();
        let before = (s.visited_len(), s.goal());

        let out = s.initialize(&g, Point::from_row_col(0, 0), Point::from_row_col(3, 0));
        assert_eq!(out, Err(SearchError::InvalidCoordinate { row: 3, col: 0 }));
        let wall = s.initialize(&g, Point::from_row_col(1, 1), Point::from_row_col(0, 0));
        assert_eq!(wall, Err(SearchError::InvalidCoordinate { row: 1, col: 1 }));
        assert_eq!((s.visited_len(), s.goal()), before);
    }

    #[test]
    fn reinitialize_discards_previous_search() {
        let g = graph(4, 4);
        let mut s = Search::new();
        s.initialize(&g, Point::from_row_col(0, 0), Point::from_row_col(3, 3))
            .unwrap();
        for _ in 0..3 {
            s.step(&g).unwrap();
        }
        assert!(s.visited_len() > 1);
        s.initialize(&g, Point::from_row_col(3, 3), Point::from_row_col(0, 0))
            .unwrap();
        assert_eq!(s.visited_len(), 1);
        assert_eq!(s.open_len(), 1);
        assert_eq!(s.stats().expansions, 0);
        assert!(s.planner_node(g.id(0, 0).unwrap()).is_none());
    }

    #[test]
    fn teardown_frees_everything() {
        let g = graph(3, 3);
        let mut s = Search::new();
        s.initialize(&g, Point::from_row_col(0, 0), Point::from_row_col(2, 2))
            .unwrap();
        s.step(&g).unwrap();
        s.teardown();
        assert_eq!(s.visited_len(), 0);
        assert_eq!(s.open_len(), 0);
        assert_eq!(s.planner_nodes().count(), 0);
        assert_eq!(s.state(), SearchState::Idle);
        assert_eq!(g.len(), 9);
    }

    #[test]
    fn with_config_validates() {
        let err = Search::with_config(SearchConfig {
            heuristic_weight: 2.0,
        })
        .unwrap_err();
        assert_eq!(err, SearchError::InvalidHeuristicWeight(2.0));
    }
}
