use std::time::{Duration, Instant};

use crate::error::SearchError;
use crate::graph::NavGraph;
use crate::session::{Search, SearchState};

impl Search {
    /// Drive the search for one scheduling tick.
    ///
    /// A zero `budget` performs exactly one expansion. Otherwise expansions
    /// run until the goal is reached or `budget` of wall-clock time has
    /// elapsed since the call began; at least one expansion always runs.
    /// A completed session is left untouched.
    ///
    /// Returns [`SearchError::Unreachable`] when the frontier is exhausted;
    /// the session stays not done and further calls keep reporting it.
    /// Only calls whose first expansion succeeds count as a tick.
    pub fn advance(
        &mut self,
        graph: &NavGraph,
        budget: Duration,
    ) -> Result<SearchState, SearchError> {
        if self.goal.is_none() {
            return Err(SearchError::NotInitialized);
        }
        self.check_graph(graph)?;
        if self.done {
            return Ok(SearchState::Done);
        }

        let started = Instant::now();
        let mut state = self.step(graph)?;
        self.stats.ticks += 1;
        while !budget.is_zero() && state != SearchState::Done && started.elapsed() < budget {
            state = self.step(graph)?;
        }
        Ok(state)
    }

    /// Run expansions until the search completes or fails.
    pub fn run_to_completion(&mut self, graph: &NavGraph) -> Result<SearchState, SearchError> {
        loop {
            if self.step(graph)? == SearchState::Done {
                return Ok(SearchState::Done);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexnav_core::{Point, TileGrid};

    fn session(map: &TileGrid, from: (i32, i32), to: (i32, i32)) -> (NavGraph, Search) {
        let g = NavGraph::from_map(map).unwrap();
        let mut s = Search::new();
        s.initialize(
            &g,
            Point::from_row_col(from.0, from.1),
            Point::from_row_col(to.0, to.1),
        )
        .unwrap();
        (g, s)
    }

    #[test]
    fn zero_budget_is_a_single_expansion() {
        let map = TileGrid::new(8, 8);
        let (g, mut s) = session(&map, (0, 0), (7, 7));
        for i in 1..=3 {
            assert_eq!(s.advance(&g, Duration::ZERO), Ok(SearchState::InProgress));
            assert_eq!(s.stats().expansions, i);
            assert_eq!(s.stats().ticks, i);
        }
    }

    #[test]
    fn large_budget_finishes_in_one_call() {
        let map = TileGrid::new(12, 12);
        let (g, mut s) = session(&map, (0, 0), (11, 11));
        let state = s.advance(&g, Duration::from_secs(60)).unwrap();
        assert_eq!(state, SearchState::Done);
        assert!(s.is_done());
        assert_eq!(s.stats().ticks, 1);
    }

    #[test]
    fn done_session_is_a_no_op() {
        let map = TileGrid::new(2, 2);
        let (g, mut s) = session(&map, (0, 0), (0, 0));
        assert_eq!(s.advance(&g, Duration::ZERO), Ok(SearchState::Done));
        let before = s.stats();
        assert_eq!(s.advance(&g, Duration::from_millis(5)), Ok(SearchState::Done));
        assert_eq!(s.stats(), before);
    }

    #[test]
    fn unreachable_stops_the_driver() {
        let map = TileGrid::parse(
            "\
..#..
..#..
..#..",
        )
        .unwrap();
        let (g, mut s) = session(&map, (1, 0), (1, 4));
        let err = s.advance(&g, Duration::from_secs(60)).unwrap_err();
        assert_eq!(err, SearchError::Unreachable);
        assert!(!s.is_done());
        assert_eq!(s.state(), SearchState::Unreachable);
        // Every reachable cell on the left side was discovered once.
        assert_eq!(s.visited_len(), 6);
        assert_eq!(s.stats().ticks, 1);
        for _ in 0..3 {
            assert_eq!(
                s.advance(&g, Duration::ZERO),
                Err(SearchError::Unreachable)
            );
        }
        // Calls on an exhausted frontier do no work.
        assert_eq!(s.stats().ticks, 1);
    }

    #[test]
    fn advance_rejects_a_foreign_graph() {
        let map = TileGrid::new(5, 5);
        let (g, mut s) = session(&map, (0, 0), (4, 4));
        let small = NavGraph::from_map(&TileGrid::new(2, 2)).unwrap();
        let before = s.stats();
        assert_eq!(
            s.advance(&small, Duration::ZERO),
            Err(SearchError::GraphMismatch)
        );
        assert_eq!(s.step(&small), Err(SearchError::GraphMismatch));
        assert_eq!(s.stats(), before);
        // The session is intact and still runs on its own graph.
        assert_eq!(s.advance(&g, Duration::from_secs(60)), Ok(SearchState::Done));
    }

    #[test]
    fn advance_before_initialize() {
        let g = NavGraph::from_map(&TileGrid::new(2, 2)).unwrap();
        let mut s = Search::new();
        assert_eq!(
            s.advance(&g, Duration::ZERO),
            Err(SearchError::NotInitialized)
        );
    }

    #[test]
    fn run_to_completion_matches_stepping() {
        let map = TileGrid::parse("....\n.##.\n....").unwrap();
        let (g, mut a) = session(&map, (0, 0), (2, 3));
        let (_, mut b) = session(&map, (0, 0), (2, 3));
        a.run_to_completion(&g).unwrap();
        while b.advance(&g, Duration::ZERO).unwrap() != SearchState::Done {}
        assert_eq!(a.solution().unwrap(), b.solution().unwrap());
        assert_eq!(a.stats().expansions, b.stats().expansions);
    }
}
