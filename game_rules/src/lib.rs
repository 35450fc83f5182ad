//! # Game Rules
//!
//! The data half of Zorkish - entity components, locations and the world arena.
//! This crate knows nothing about messages or the dispatcher; it only holds state
//! and the rules for mutating it.

pub mod entities;
pub mod mechanics;
pub mod world_state;

pub use entities::*;
pub use mechanics::*;
pub use world_state::*;
