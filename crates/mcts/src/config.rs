//! Monte-Carlo actor configuration.
//!
//! Two knobs: how many sampling units a move decision may spend and how the
//! evaluator spreads them over the children.

use serde::{Deserialize, Serialize};

use crate::policy::AllocationPolicy;

/// Monte-Carlo actor configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Sampling units per move decision.
    /// One unit is either one random playout or one child visit.
    pub budget: u32,

    /// Allocation of the budget over a node's children.
    pub policy: AllocationPolicy,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            budget: 1000,
            policy: AllocationPolicy::Uniform,
        }
    }
}

impl MonteCarloConfig {
    /// Create a new config with the specified budget.
    pub fn with_budget(budget: u32) -> Self {
        Self {
            budget,
            ..Default::default()
        }
    }

    /// Create a config using the adaptive allocation policy.
    pub fn adaptive(budget: u32) -> Self {
        Self {
            budget,
            policy: AllocationPolicy::Adaptive,
        }
    }
}
