use crate::error::SearchError;

/// Default weight applied to the heuristic term of the final cost.
pub const DEFAULT_HEURISTIC_WEIGHT: f32 = 0.5;

/// Tuning for a search session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Scales the heuristic in `final = given + heuristic_weight * heuristic`.
    ///
    /// 0 degrades to uniform-cost search. Values above 0.5 favour speed over
    /// optimality and can force already-expanded nodes to be reopened.
    pub heuristic_weight: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
        }
    }
}

impl SearchConfig {
    /// Check that the heuristic weight is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<(), SearchError> {
        let w = self.heuristic_weight;
        if !w.is_finite() || !(0.0..=1.0).contains(&w) {
            return Err(SearchError::InvalidHeuristicWeight(w));
        }
        Ok(())
    }
}
