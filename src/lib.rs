//! Arcade-shooter simulation that runs as a decorative, interactive backdrop.
//!
//! The library holds the pure simulation: entity stores, collision tests,
//! spawning, input mapping, the per-tick update engine and the
//! `Playing → Dying → GameOver` state machine.  All terminal I/O lives in the
//! binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod effects;
pub mod entities;
pub mod error;
pub mod input;
pub mod phase;
pub mod scaling;
pub mod simulation;
pub mod spawner;
pub mod utils;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use phase::Transition;
pub use simulation::Simulation;
