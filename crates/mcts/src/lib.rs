//! Budgeted Monte-Carlo search for Ultimatoe games.
//!
//! This crate provides a Monte-Carlo evaluator that can be used with any
//! game implementing the `ultimatoe_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **Fixed Budget**: Work is bounded by sampling units, not wall-clock time
//! - **Allocation Policies**: Round robin or adaptive spreading of the budget
//! - **Best-Line Propagation**: Each node follows the statistics of its best child
//! - **Deterministic**: A seed fully determines every decision
//!
//! # Example
//!
//! ```
//! use ultimatoe_boards::Ultimatoe;
//! use ultimatoe_core::Game;
//! use ultimatoe_mcts::{Actor, MonteCarloActor, MonteCarloConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = Ultimatoe::default();
//! let state = game.initial_state();
//!
//! let config = MonteCarloConfig::adaptive(500);
//! let mut actor = MonteCarloActor::new(config, ChaCha8Rng::seed_from_u64(42));
//!
//! let mv = actor.select_move(&game, &state).unwrap();
//! let state = game.play(&state, &mv).unwrap();
//! assert_eq!(game.turn(&state), 1);
//! ```

pub mod actor;
pub mod config;
pub mod evaluator;
pub mod game_match;
mod node;
pub mod policy;
mod tree;

pub use actor::{Actor, MonteCarloActor, RandomActor};
pub use config::MonteCarloConfig;
pub use evaluator::{MonteCarloEvaluator, UNCERTAINTY_WEIGHT};
pub use game_match::{ActorStats, GameMatch};
pub use policy::{Allocation, AllocationPolicy, BURST_UNITS};
