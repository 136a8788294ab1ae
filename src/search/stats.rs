//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected while planning one turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States produced by applying a candidate action.
    pub states_expanded: u32,

    /// Candidate actions the rules rejected on the cloned state.
    pub rejected: u32,

    /// Heuristic evaluations.
    pub evaluations: u32,

    /// Deepest lookahead level reached.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the counters of a branch searched separately.
    pub fn merge(&mut self, other: &SearchStats) {
        self.states_expanded += other.states_expanded;
        self.rejected += other.rejected;
        self.evaluations += other.evaluations;
        self.max_depth = self.max_depth.max(other.max_depth);
    }

    /// Expanded states per second.
    #[must_use]
    pub fn states_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.states_expanded) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_per_second() {
        let mut stats = SearchStats::new();
        stats.states_expanded = 500;
        stats.time_us = 250_000;
        assert_eq!(stats.states_per_second(), 2000.0);
        assert_eq!(SearchStats::new().states_per_second(), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut stats = SearchStats {
            states_expanded: 3,
            max_depth: 1,
            ..SearchStats::default()
        };
        stats.merge(&SearchStats {
            states_expanded: 4,
            rejected: 1,
            evaluations: 9,
            max_depth: 2,
            time_us: 77,
        });
        assert_eq!(stats.states_expanded, 7);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.time_us, 0);
    }
}
