use serde::Serialize;

use super::state::{CollisionType, PowerUpKind};

/// Discrete feedback emitted by a tick, consumed by audio/visual layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    AteFood,
    CollectedPowerUp(PowerUpKind),
    Died(CollisionType),
}

/// Result of a single tick
///
/// A tick emits at most one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub event: Option<GameEvent>,
}

impl TickOutcome {
    /// The tick advanced nothing or moved the snake without incident
    pub fn quiet() -> Self {
        Self { event: None }
    }

    pub fn with_event(event: GameEvent) -> Self {
        Self { event: Some(event) }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.event, Some(GameEvent::Died(_)))
    }
}
