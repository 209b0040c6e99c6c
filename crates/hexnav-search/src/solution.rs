use crate::error::SearchError;
use crate::graph::CellId;
use crate::session::{NodeHandle, Search};

impl Search {
    /// The route found, ordered from the goal back to the start (both
    /// included).
    ///
    /// Fails with [`SearchError::NotDone`] until the goal has been reached.
    pub fn solution(&self) -> Result<Vec<CellId>, SearchError> {
        if !self.done {
            return Err(SearchError::NotDone);
        }
        let terminal = self
            .terminal
            .or_else(|| self.open.peek_min())
            .ok_or(SearchError::NotDone)?;
        Ok(self.trace(terminal))
    }

    /// Route from the start to the most promising frontier node, ordered
    /// from that node back to the start.
    ///
    /// Lets a host begin moving before the search completes. Returns `None`
    /// when the session is idle or the frontier is empty.
    pub fn partial_solution(&self) -> Option<Vec<CellId>> {
        if self.done {
            return self.solution().ok();
        }
        self.open.peek_min().map(|h| self.trace(h))
    }

    /// Cost of the route returned by [`solution`](Self::solution).
    pub fn solution_cost(&self) -> Result<f32, SearchError> {
        if !self.done {
            return Err(SearchError::NotDone);
        }
        let goal = self.goal.ok_or(SearchError::NotDone)?;
        self.planner_node(goal)
            .map(|n| n.given_cost())
            .ok_or(SearchError::NotDone)
    }

    /// Follow parent links from `from` to the root.
    fn trace(&self, from: NodeHandle) -> Vec<CellId> {
        let mut path = Vec::new();
        let mut cur = Some(from);
        // Bounded by the arena size.
        while let Some(h) = cur {
            if path.len() > self.nodes.len() {
                break;
            }
            let node = self.node(h);
            path.push(node.cell());
            cur = node.parent();
        }
        path
    }
}
