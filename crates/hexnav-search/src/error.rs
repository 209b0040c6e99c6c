use std::fmt;

/// Errors reported by graph construction and search sessions.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A start or goal tile is out of bounds or impassable.
    InvalidCoordinate { row: i32, col: i32 },
    /// Popped from an empty open set.
    EmptyQueue,
    /// A solution was requested before the search completed.
    NotDone,
    /// A session operation was attempted before a graph was loaded.
    NotLoaded,
    /// `update` was called with no initialized session.
    NotInitialized,
    /// The open set ran dry without reaching the goal.
    Unreachable,
    /// A session was driven with a graph other than the one it was
    /// initialized against.
    GraphMismatch,
    /// The environment returned no tile for an in-bounds position.
    MissingTile { row: i32, col: i32 },
    /// The environment reported a negative or non-finite weight.
    InvalidWeight { row: i32, col: i32, weight: f32 },
    /// Heuristic weight outside `[0, 1]`.
    InvalidHeuristicWeight(f32),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { row, col } => {
                write!(f, "tile ({row}, {col}) is out of bounds or impassable")
            }
            Self::EmptyQueue => write!(f, "pop from an empty open set"),
            Self::NotDone => write!(f, "search has not reached the goal yet"),
            Self::NotLoaded => write!(f, "no navigation graph loaded"),
            Self::NotInitialized => write!(f, "no search session initialized"),
            Self::Unreachable => write!(f, "goal is unreachable from start"),
            Self::GraphMismatch => {
                write!(f, "graph differs from the one the search was initialized on")
            }
            Self::MissingTile { row, col } => {
                write!(f, "tile map has no tile at ({row}, {col})")
            }
            Self::InvalidWeight { row, col, weight } => {
                write!(f, "tile ({row}, {col}) has invalid weight {weight}")
            }
            Self::InvalidHeuristicWeight(w) => {
                write!(f, "heuristic weight {w} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for SearchError {}
