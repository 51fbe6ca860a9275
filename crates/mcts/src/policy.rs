//! Budget allocation policies.
//!
//! A policy decides, round by round, which children of an expanded node
//! receive budget and how much. It only looks at the children's ranking
//! keys, so it is a pure function and can be tested without a game.

use serde::{Deserialize, Serialize};

/// Units each child gets in an adaptive full pass when the budget is large
/// enough. More than one unit makes a child expand and recurse.
pub const BURST_UNITS: u32 = 10;

/// How an expanded node spreads its budget over its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationPolicy {
    /// Round robin, one unit per child per round.
    #[default]
    Uniform,
    /// Alternate full passes (bursting while budget allows) with passes over
    /// the weaker half of the children.
    Adaptive,
}

/// The children selected for one round and the units each one gets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Child indexes, in spending order.
    pub indices: Vec<usize>,
    pub units: u32,
}

impl AllocationPolicy {
    /// Plan round `round` given each child's ranking key (higher is better for
    /// the player to move) and the budget still left at the node.
    pub fn plan(self, round: u32, ranking_keys: &[f64], remaining: u32) -> Allocation {
        let len = ranking_keys.len();
        match self {
            AllocationPolicy::Uniform => Allocation {
                indices: (0..len).collect(),
                units: 1,
            },
            AllocationPolicy::Adaptive if round % 2 == 0 => {
                let burst = u64::from(remaining) > u64::from(BURST_UNITS) * len as u64;
                Allocation {
                    indices: (0..len).collect(),
                    units: if burst { BURST_UNITS } else { 1 },
                }
            }
            AllocationPolicy::Adaptive => {
                let mut indices: Vec<usize> = (0..len).collect();
                // Stable, so equal keys keep index order
                indices.sort_by(|&a, &b| ranking_keys[a].total_cmp(&ranking_keys[b]));
                indices.truncate(len / 2);
                Allocation { indices, units: 1 }
            }
        }
    }
}
