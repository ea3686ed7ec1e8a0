use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// Per-session statistics shown in the HUD
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub session_best: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    pub power_ups_collected: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            session_best: 0,
            games_played: 0,
            food_eaten: 0,
            power_ups_collected: 0,
            running: false,
        }
    }

    /// Refresh the run timer; frozen outside of a run
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.food_eaten = 0;
        self.power_ups_collected = 0;
        self.running = true;
    }

    pub fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::AteFood => self.food_eaten += 1,
            GameEvent::CollectedPowerUp(_) => self.power_ups_collected += 1,
            GameEvent::Died(_) => {}
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.running = false;
        self.games_played += 1;
        if final_score > self.session_best {
            self.session_best = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, PowerUpKind};

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_session_best_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.session_best, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.session_best, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.session_best, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_event_counters() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();

        metrics.on_event(GameEvent::AteFood);
        metrics.on_event(GameEvent::AteFood);
        metrics.on_event(GameEvent::CollectedPowerUp(PowerUpKind::Speed));
        metrics.on_event(GameEvent::Died(CollisionType::Wall));

        assert_eq!(metrics.food_eaten, 2);
        assert_eq!(metrics.power_ups_collected, 1);

        metrics.on_game_start();
        assert_eq!(metrics.food_eaten, 0);
        assert_eq!(metrics.power_ups_collected, 0);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_timer_frozen_after_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        metrics.on_game_over(0);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();

        assert_eq!(metrics.elapsed_time, frozen);
    }
}
