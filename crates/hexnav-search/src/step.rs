use crate::distance::euclidean;
use crate::error::SearchError;
use crate::graph::NavGraph;
use crate::session::{PlannerNode, Search, SearchState};

impl Search {
    /// Perform a single expansion.
    ///
    /// Looks at the cheapest frontier node. If it is the goal the session
    /// completes and the node stays at the front of the open set. Otherwise
    /// the node is popped and every neighbor relaxed: new cells get a fresh
    /// planner node, cheaper paths to known cells are re-queued whether or
    /// not those cells were already expanded.
    ///
    /// Returns [`SearchError::Unreachable`] once the open set is empty and
    /// [`SearchError::GraphMismatch`] if `graph` is not the one the session
    /// was initialized against.
    pub fn step(&mut self, graph: &NavGraph) -> Result<SearchState, SearchError> {
        let goal = self.goal.ok_or(SearchError::NotInitialized)?;
        self.check_graph(graph)?;
        if self.done {
            return Ok(SearchState::Done);
        }
        let Some(current) = self.open.peek_min() else {
            return Err(SearchError::Unreachable);
        };

        let (cur_cell, cur_given) = {
            let cur = self.node(current);
            (cur.cell, cur.given)
        };
        if cur_cell == goal {
            self.done = true;
            self.terminal = Some(current);
            log::debug!(
                "search reached goal: cost {cur_given:.2}, {} expansions, {} visited",
                self.stats.expansions,
                self.visited.len()
            );
            return Ok(SearchState::Done);
        }

        self.open.pop_min()?;
        self.stats.expansions += 1;

        let hw = self.config.heuristic_weight;
        let goal_tile = graph.node(goal).tile();
        for &n in graph.node(cur_cell).neighbors() {
            let neighbor = graph.node(n);
            let tentative = cur_given + neighbor.weight();

            match self.visited.get(&n).copied() {
                None => {
                    let heuristic = euclidean(neighbor.tile(), goal_tile);
                    self.insert(PlannerNode {
                        cell: n,
                        parent: Some(current),
                        heuristic,
                        given: tentative,
                        final_cost: tentative + heuristic * hw,
                    });
                }
                Some(h) => {
                    let node = &mut self.nodes[usize::from(h)];
                    if tentative >= node.given {
                        continue;
                    }
                    node.parent = Some(current);
                    node.given = tentative;
                    node.final_cost = tentative + node.heuristic * hw;
                    let priority = node.final_cost;

                    if self.open.remove(h).is_none() {
                        self.stats.reopened += 1;
                    }
                    self.open.push(h, priority);
                    self.stats.improvements += 1;
                }
            }
        }

        log::trace!(
            "expanded {}: open {}, visited {}",
            graph.node(cur_cell).point(),
            self.open.len(),
            self.visited.len()
        );
        if self.open.is_empty() {
            log::warn!(
                "search exhausted after {} expansions without reaching {}",
                self.stats.expansions,
                goal_tile.point()
            );
        }
        Ok(SearchState::InProgress)
    }
}
