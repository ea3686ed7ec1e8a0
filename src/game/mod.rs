//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The scheduler drives it through [`GameSimulation::tick`] and redraws from
//! [`GameSimulation::snapshot`].

pub mod action;
pub mod config;
pub mod engine;
pub mod events;
pub mod placement;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{GameSimulation, Timestamp};
pub use events::{GameEvent, TickOutcome};
pub use state::{
    ActivePowerUp, CollisionType, GameSnapshot, LifecycleState, Position, PowerUpItem,
    PowerUpKind, Snake,
};
