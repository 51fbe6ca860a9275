//! Ultimatoe Core - the game state contract
//!
//! This crate provides the `Game` trait every board game implements so that
//! the Monte-Carlo players can drive it without knowing its rules.
//!
//! # Types
//!
//! - [`Game`] - Trait for rules objects and their immutable states
//! - [`Children`] - Bidirectional mapping between child states and move strings
//! - [`Player`] - The two sides of a game, `X` always moving first

mod children;
mod error;
mod game;
mod types;

pub use children::Children;
pub use error::{GameError, Result};
pub use game::Game;
pub use types::Player;
