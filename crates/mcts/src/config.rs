//! MCTS configuration parameters.

/// Rollout ply cap used by the determinized search.
pub const DEFAULT_ROLLOUT_CAP: usize = 1000;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/rollout/backpropagate cycles per search.
    pub num_iterations: usize,

    /// UCB1 exploration constant `C` in `w/n + C * sqrt(ln N / n)`.
    pub exploration_constant: f32,

    /// Maximum plies in a random rollout. `None` plays to the end.
    ///
    /// A capped rollout that does not finish counts as a loss.
    pub max_rollout_depth: Option<usize>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_iterations: 1000,
            exploration_constant: 1.41,
            max_rollout_depth: None,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(num_iterations: usize) -> Self {
        Self {
            num_iterations,
            ..Default::default()
        }
    }

    /// Config for the determinized search: rollouts are capped.
    pub fn determinized(num_iterations: usize) -> Self {
        Self {
            num_iterations,
            max_rollout_depth: Some(DEFAULT_ROLLOUT_CAP),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_iterations, 1000);
        assert!((config.exploration_constant - 1.41).abs() < 1e-6);
        assert_eq!(config.max_rollout_depth, None);
    }

    #[test]
    fn test_with_iterations() {
        let config = MctsConfig::with_iterations(100);
        assert_eq!(config.num_iterations, 100);
        assert!((config.exploration_constant - 1.41).abs() < 1e-6);
    }

    #[test]
    fn test_determinized() {
        let config = MctsConfig::determinized(250);
        assert_eq!(config.num_iterations, 250);
        assert_eq!(config.max_rollout_depth, Some(DEFAULT_ROLLOUT_CAP));
    }
}
