use std::time::Duration;

use hexnav_core::{Point, Tile, TileMap};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::graph::NavGraph;
use crate::session::{Search, SearchState, SearchStats};

/// Host-facing engine: one loaded navigation graph and one search session.
///
/// Typical frame-driven use:
///
/// ```
/// use hexnav_core::TileGrid;
/// use hexnav_search::PathSearch;
///
/// let map = TileGrid::parse("....\n.#..\n....").unwrap();
/// let mut ps = PathSearch::new();
/// ps.load(&map).unwrap();
/// ps.initialize(0, 0, 2, 3).unwrap();
/// while !ps.is_done() {
///     ps.update(2).unwrap();
/// }
/// let route = ps.solution().unwrap();
/// assert_eq!((route[0].row, route[0].col), (2, 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    graph: NavGraph,
    search: Search,
}

impl PathSearch {
    /// Create an engine with the default configuration and no graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with `config`, rejecting invalid settings.
    pub fn with_config(config: SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            graph: NavGraph::new(),
            search: Search::with_config(config)?,
        })
    }

    /// Build the navigation graph for `map`, replacing any previous one.
    ///
    /// The active session is torn down first since it refers to the old
    /// graph. If the build fails no graph is loaded.
    pub fn load<M: TileMap + ?Sized>(&mut self, map: &M) -> Result<(), SearchError> {
        self.search.teardown();
        self.graph.build(map)
    }

    /// Release the session and the graph.
    pub fn unload(&mut self) {
        self.search.teardown();
        self.graph.teardown();
    }

    /// Whether a graph is loaded.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        !self.graph.is_empty()
    }

    /// Start searching from `(start_row, start_col)` to
    /// `(goal_row, goal_col)`, discarding any previous search.
    pub fn initialize(
        &mut self,
        start_row: i32,
        start_col: i32,
        goal_row: i32,
        goal_col: i32,
    ) -> Result<(), SearchError> {
        self.search.initialize(
            &self.graph,
            Point::from_row_col(start_row, start_col),
            Point::from_row_col(goal_row, goal_col),
        )
    }

    /// One scheduling tick: a single expansion when `budget_millis` is 0,
    /// otherwise expansions until done or the budget elapses.
    pub fn update(&mut self, budget_millis: u64) -> Result<SearchState, SearchError> {
        if !self.is_loaded() {
            return Err(SearchError::NotLoaded);
        }
        self.search
            .advance(&self.graph, Duration::from_millis(budget_millis))
    }

    /// Whether the goal has been reached.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.search.is_done()
    }

    /// Tiles along the route, ordered from the goal back to the start.
    pub fn solution(&self) -> Result<Vec<Tile>, SearchError> {
        if !self.is_loaded() {
            return Err(SearchError::NotLoaded);
        }
        Ok(self
            .search
            .solution()?
            .into_iter()
            .map(|c| *self.graph.node(c).tile())
            .collect())
    }

    /// Release the session's state while keeping the graph loaded.
    pub fn teardown(&mut self) {
        self.search.teardown();
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.search.state()
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.search.stats()
    }

    #[inline]
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    #[inline]
    pub fn search(&self) -> &Search {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexnav_core::{TileGrid, WALL};

    fn coords(route: &[Tile]) -> Vec<(i32, i32)> {
        route.iter().map(|t| (t.row, t.col)).collect()
    }

    #[test]
    fn operations_require_a_graph() {
        let mut ps = PathSearch::new();
        assert!(!ps.is_loaded());
        assert_eq!(ps.initialize(0, 0, 1, 1), Err(SearchError::NotLoaded));
        assert_eq!(ps.update(0), Err(SearchError::NotLoaded));
        assert_eq!(ps.solution(), Err(SearchError::NotLoaded));
    }

    #[test]
    fn update_without_initialize() {
        let mut ps = PathSearch::new();
        ps.load(&TileGrid::new(2, 2)).unwrap();
        assert_eq!(ps.update(0), Err(SearchError::NotInitialized));
    }

    #[test]
    fn three_by_three_scenario() {
        let mut ps = PathSearch::new();
        ps.load(&TileGrid::new(3, 3)).unwrap();
        ps.initialize(0, 0, 2, 2).unwrap();
        assert_eq!(ps.solution(), Err(SearchError::NotDone));
        while ps.update(0).unwrap() != SearchState::Done {}
        assert!(ps.is_done());
        let route = coords(&ps.solution().unwrap());
        assert!(route.len() >= 3);
        assert_eq!(route[0], (2, 2));
        assert_eq!(*route.last().unwrap(), (0, 0));
    }

    #[test]
    fn done_until_next_initialize() {
        let mut ps = PathSearch::new();
        ps.load(&TileGrid::new(3, 3)).unwrap();
        ps.initialize(0, 0, 0, 1).unwrap();
        ps.update(100).unwrap();
        assert!(ps.is_done());
        ps.update(0).unwrap();
        assert!(ps.is_done());
        ps.initialize(0, 0, 2, 2).unwrap();
        assert!(!ps.is_done());
    }

    #[test]
    fn load_twice_gives_the_same_graph() {
        let map = TileGrid::parse("..#.\n.2..\n#...").unwrap();
        let mut ps = PathSearch::new();
        ps.load(&map).unwrap();
        let first: Vec<Vec<_>> = ps
            .graph()
            .iter()
            .map(|(_, n)| n.neighbors().to_vec())
            .collect();
        ps.load(&map).unwrap();
        let second: Vec<Vec<_>> = ps
            .graph()
            .iter()
            .map(|(_, n)| n.neighbors().to_vec())
            .collect();
        assert_eq!(ps.graph().len(), 12);
        assert_eq!(first, second);
    }

    #[test]
    fn reload_discards_session() {
        let mut ps = PathSearch::new();
        ps.load(&TileGrid::new(4, 4)).unwrap();
        ps.initialize(0, 0, 3, 3).unwrap();
        ps.update(0).unwrap();
        ps.load(&TileGrid::new(2, 2)).unwrap();
        assert_eq!(ps.state(), SearchState::Idle);
        assert_eq!(ps.search().visited_len(), 0);
    }

    #[test]
    fn unreachable_then_recover() {
        let map = TileGrid::parse(
            "\
...#...
...#...
...#...
...#...",
        )
        .unwrap();
        let mut ps = PathSearch::new();
        ps.load(&map).unwrap();
        ps.initialize(0, 0, 3, 6).unwrap();
        assert_eq!(ps.update(1000), Err(SearchError::Unreachable));
        assert!(!ps.is_done());
        assert_eq!(ps.solution(), Err(SearchError::NotDone));

        ps.teardown();
        ps.initialize(0, 0, 3, 2).unwrap();
        ps.update(1000).unwrap();
        assert!(ps.is_done());
    }

    #[test]
    fn teardown_keeps_graph() {
        let mut ps = PathSearch::new();
        ps.load(&TileGrid::new(3, 3)).unwrap();
        ps.initialize(0, 0, 2, 2).unwrap();
        ps.update(0).unwrap();
        ps.teardown();
        assert!(ps.is_loaded());
        assert_eq!(ps.stats(), SearchStats::default());
        ps.unload();
        assert!(!ps.is_loaded());
    }

    #[test]
    fn invalid_start_or_goal() {
        let mut map = TileGrid::new(3, 3);
        map.set_weight(2, 2, WALL);
        let mut ps = PathSearch::new();
        ps.load(&map).unwrap();
        assert_eq!(
            ps.initialize(0, 0, 2, 2),
            Err(SearchError::InvalidCoordinate { row: 2, col: 2 })
        );
        assert_eq!(
            ps.initialize(-1, 0, 1, 1),
            Err(SearchError::InvalidCoordinate { row: -1, col: 0 })
        );
    }

    #[test]
    fn heavier_heuristic_is_accepted() {
        let mut ps = PathSearch::with_config(SearchConfig {
            heuristic_weight: 1.0,
        })
        .unwrap();
        ps.load(&TileGrid::new(6, 6)).unwrap();
        ps.initialize(5, 0, 0, 5).unwrap();
        ps.update(1000).unwrap();
        assert!(ps.is_done());
        assert!(PathSearch::with_config(SearchConfig {
            heuristic_weight: -1.0
        })
        .is_err());
    }
}
