use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    events::{GameEvent, TickOutcome},
    placement::random_free_cell,
    state::{
        ActivePowerUp, CollisionType, GameSnapshot, LifecycleState, Position, PowerUpItem,
        PowerUpKind, Snake,
    },
};

/// Milliseconds on the caller's monotonic game clock
pub type Timestamp = u64;

const INITIAL_SNAKE_LENGTH: usize = 3;

/// The game simulation that owns all state and handles all game logic
///
/// Time never flows implicitly: every time-dependent operation takes `now`
/// from the caller, which keeps runs reproducible under a seeded RNG.
pub struct GameSimulation<R = StdRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    pending_direction: Direction,
    food: Position,
    lifecycle: LifecycleState,
    score: u32,
    base_speed_ms: u64,
    power_up_item: Option<PowerUpItem>,
    active_power_up: Option<ActivePowerUp>,
    last_power_up_spawn: Timestamp,
}

impl GameSimulation<StdRng> {
    /// Create a new simulation seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a reproducible simulation
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSimulation<R> {
    /// Create a simulation sitting in the menu with the idle board
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let base_speed_ms = config.base_speed_ms;
        Self {
            config,
            rng,
            snake: Snake::new(Position::new(0, 0), Direction::Up, INITIAL_SNAKE_LENGTH),
            pending_direction: Direction::Up,
            food: Position::new(3, 0),
            lifecycle: LifecycleState::Menu,
            score: 0,
            base_speed_ms,
            power_up_item: None,
            active_power_up: None,
            last_power_up_spawn: 0,
        }
    }

    /// Start a fresh run, discarding any previous state
    pub fn reset(&mut self, now: Timestamp) {
        self.snake = Snake::new(Position::new(0, 2), Direction::Up, INITIAL_SNAKE_LENGTH);
        self.pending_direction = Direction::Up;
        self.food = Position::new(0, -3);
        self.score = 0;
        self.base_speed_ms = self.config.base_speed_ms;
        self.lifecycle = LifecycleState::Playing;
        self.power_up_item = None;
        self.active_power_up = None;
        self.last_power_up_spawn = now;
    }

    /// Queue a direction change for the next tick
    ///
    /// Reversals are checked against both the direction in effect and the
    /// one already queued, so two quick inputs between ticks cannot fold the
    /// snake back onto itself. Returns whether the input was accepted.
    pub fn set_direction(&mut self, candidate: Direction) -> bool {
        if self.snake.direction.is_opposite(candidate)
            || self.pending_direction.is_opposite(candidate)
        {
            return false;
        }
        self.pending_direction = candidate;
        true
    }

    /// Advance the simulation by one cell
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        if self.lifecycle != LifecycleState::Playing {
            return TickOutcome::quiet();
        }

        // Expiry is only discovered on tick boundaries
        if self
            .active_power_up
            .is_some_and(|active| active.is_expired(now))
        {
            self.active_power_up = None;
        }

        if self.power_up_item.is_none()
            && now.saturating_sub(self.last_power_up_spawn) > self.config.power_up_spawn_interval_ms
        {
            self.power_up_item = self.spawn_power_up();
            self.last_power_up_spawn = now;
        }

        self.snake.direction = self.pending_direction;
        let mut new_head = self.snake.head().moved_in_direction(self.snake.direction);

        if self.is_invincible() {
            new_head = new_head.wrapped(self.config.boundary());
        } else if let Some(collision) = self.check_collision(new_head) {
            self.lifecycle = LifecycleState::GameOver;
            return TickOutcome::with_event(GameEvent::Died(collision));
        }

        self.snake.push_head(new_head);

        // Food takes priority over a power-up on the same cell
        if new_head == self.food {
            self.score += self.config.points_per_food;
            self.base_speed_ms = self
                .base_speed_ms
                .saturating_sub(self.config.speed_increment_ms)
                .max(self.config.min_speed_ms);
            self.respawn_food();
            return TickOutcome::with_event(GameEvent::AteFood);
        }

        if let Some(item) = self.power_up_item.filter(|item| item.position == new_head) {
            self.active_power_up = Some(ActivePowerUp {
                kind: item.kind,
                expires_at: now.saturating_add(self.config.power_up_duration_ms),
            });
            self.power_up_item = None;
            self.last_power_up_spawn = now;
            self.snake.drop_tail();
            return TickOutcome::with_event(GameEvent::CollectedPowerUp(item.kind));
        }

        self.snake.drop_tail();
        TickOutcome::quiet()
    }

    /// Delay the scheduler should wait before the next tick
    pub fn effective_interval_ms(&self) -> u64 {
        match self.active_power_up {
            Some(ActivePowerUp {
                kind: PowerUpKind::Speed,
                ..
            }) => self.base_speed_ms / 2,
            _ => self.base_speed_ms,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !pos.is_in_bounds(self.config.boundary()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn spawn_power_up(&mut self) -> Option<PowerUpItem> {
        let kind = if self.rng.gen_bool(0.5) {
            PowerUpKind::Speed
        } else {
            PowerUpKind::Invincible
        };

        let mut excluded = self.snake.body.clone();
        excluded.push(self.food);

        let position = random_free_cell(&mut self.rng, &self.config, &excluded);
        if position.is_none() {
            tracing::warn!(?kind, "no free cell left for a power-up, skipping spawn");
        }
        position.map(|position| PowerUpItem { position, kind })
    }

    fn respawn_food(&mut self) {
        let mut excluded = self.snake.body.clone();
        if let Some(item) = self.power_up_item {
            excluded.push(item.position);
        }

        match random_free_cell(&mut self.rng, &self.config, &excluded) {
            Some(food) => self.food = food,
            None => tracing::warn!("no free cell left for food, keeping previous cell"),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &[Position] {
        &self.snake.body
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn power_up_item(&self) -> Option<PowerUpItem> {
        self.power_up_item
    }

    pub fn active_power_up(&self) -> Option<ActivePowerUp> {
        self.active_power_up
    }

    /// Time left on the active power-up; zero once past expiry but not yet cleared
    pub fn remaining_power_up_ms(&self, now: Timestamp) -> Option<u64> {
        self.active_power_up.map(|active| active.remaining_ms(now))
    }

    pub fn is_invincible(&self) -> bool {
        self.active_power_up
            .is_some_and(|active| active.kind == PowerUpKind::Invincible)
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn base_speed_ms(&self) -> u64 {
        self.base_speed_ms
    }

    pub fn snapshot(&self, now: Timestamp) -> GameSnapshot {
        GameSnapshot {
            boundary: self.config.boundary(),
            snake: self.snake.body.clone(),
            direction: self.snake.direction,
            food: self.food,
            power_up_item: self.power_up_item,
            active_power_up: self.active_power_up,
            remaining_power_up_ms: self.remaining_power_up_ms(now),
            lifecycle: self.lifecycle,
            score: self.score,
            base_speed_ms: self.base_speed_ms,
            effective_interval_ms: self.effective_interval_ms(),
        }
    }
}
