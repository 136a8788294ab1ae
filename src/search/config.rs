//! Turn search configuration parameters.

use serde::{Deserialize, Serialize};

/// Turn search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Lookahead depth below each root candidate (0 = pure greedy).
    pub depth: u32,

    /// Candidates kept per level of lookahead, best immediate score first.
    pub beam_width: usize,

    /// Actions planned in one turn before the search gives up and ends it.
    pub max_actions: usize,

    /// Minimum score gain an action must promise to be taken.
    /// Below it the turn ends.
    pub threshold: f64,

    /// Seed mixed into the planning RNG stream.
    pub seed: u64,

    /// Score root candidates on the rayon pool.
    /// Plans are identical to the serial search.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            beam_width: 6,
            max_actions: 20,
            threshold: 0.05,
            seed: 42,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom lookahead depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with custom beam width.
    #[must_use]
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width.max(1);
        self
    }

    #[must_use]
    pub fn with_max_actions(mut self, actions: usize) -> Self {
        self.max_actions = actions;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.beam_width, 6);
        assert_eq!(config.max_actions, 20);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_depth(0)
            .with_beam_width(0)
            .with_seed(7)
            .with_parallel(true);

        assert_eq!(config.depth, 0);
        assert_eq!(config.beam_width, 1);
        assert_eq!(config.seed, 7);
        assert!(config.parallel);
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_threshold(0.5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
