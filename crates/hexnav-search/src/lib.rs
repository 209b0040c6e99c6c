//! Incremental, time-sliced A* over staggered-row tile grids.
//!
//! The crate splits a query into three layers:
//!
//! - a [`NavGraph`] built once per tile map, caching each cell's
//!   staggered-row neighbors and weight;
//! - a [`Search`] session holding the open set ([`PriorityQueue`]) and the
//!   planner nodes discovered so far, advanced one expansion at a time
//!   ([`Search::step`]) or for a wall-clock budget ([`Search::advance`]);
//! - [`PathSearch`], a host-facing wrapper owning one graph and one session
//!   behind a `load` / `initialize` / `update` / `solution` interface.
//!
//! A graph is read-only once built, so any number of sessions can search it
//! at the same time; each session is driven from a single thread.
//!
//! # Adjacency
//!
//! Candidates are the eight surrounding cells. Even rows drop the same-row
//! cell to the left, odd rows the same-row cell to the right, and
//! zero-weight cells are never entered. See [`is_staggered_neighbor`].

mod config;
mod distance;
mod engine;
mod error;
mod graph;
mod neighbors;
mod queue;
mod scheduler;
mod session;
mod solution;
mod step;

pub use config::{DEFAULT_HEURISTIC_WEIGHT, SearchConfig};
pub use distance::euclidean;
pub use engine::PathSearch;
pub use error::SearchError;
pub use graph::{CellId, GraphNode, NavGraph};
pub use neighbors::{Neighbors, is_staggered_neighbor};
pub use queue::PriorityQueue;
pub use session::{NodeHandle, PlannerNode, Search, SearchState, SearchStats};
