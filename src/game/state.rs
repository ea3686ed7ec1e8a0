use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game grid
///
/// The board is centred on the origin, so valid cells satisfy
/// `|x| <= boundary && |y| <= boundary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_in_bounds(&self, boundary: i32) -> bool {
        self.x.abs() <= boundary && self.y.abs() <= boundary
    }

    /// Toroidal wrap: a coordinate past one edge re-enters at the opposite edge
    pub fn wrapped(&self, boundary: i32) -> Self {
        let wrap = |v: i32| {
            if v > boundary {
                -boundary
            } else if v < -boundary {
                boundary
            } else {
                v
            }
        };
        Self {
            x: wrap(self.x),
            y: wrap(self.y),
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Prepend a new head; the snake is one segment longer until the tail is dropped
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drop the last segment, never shrinking below a single head cell
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Phase of a run; only `Playing` advances the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    #[default]
    Menu,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Halves the tick interval while active
    Speed,
    /// Walls wrap around and self-collisions are ignored
    Invincible,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "SPEED",
            PowerUpKind::Invincible => "INVINCIBLE",
        }
    }
}

/// A collectible lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpItem {
    pub position: Position,
    pub kind: PowerUpKind,
}

/// A collected power-up currently modifying the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Absolute expiry on the game clock, in milliseconds
    pub expires_at: u64,
}

impl ActivePowerUp {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    pub fn remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }
}

/// Owned, read-only copy of everything the presentation layer draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub boundary: i32,
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub power_up_item: Option<PowerUpItem>,
    pub active_power_up: Option<ActivePowerUp>,
    pub remaining_power_up_ms: Option<u64>,
    pub lifecycle: LifecycleState,
    pub score: u32,
    pub base_speed_ms: u64,
    pub effective_interval_ms: u64,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn is_invincible(&self) -> bool {
        self.active_power_up
            .is_some_and(|active| active.kind == PowerUpKind::Invincible)
    }
}
