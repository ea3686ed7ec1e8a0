use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, sleep};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEvent, GameSimulation, LifecycleState, Timestamp};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer};
use crate::storage::HighScoreStore;

/// How long an event stays highlighted in the HUD
const FLASH_MS: Timestamp = 400;

pub struct HumanMode {
    simulation: GameSimulation,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    high_scores: HighScoreStore,
    clock: Instant,
    flash: Option<(GameEvent, Timestamp)>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>, high_scores: HighScoreStore) -> Self {
        let simulation = match seed {
            Some(seed) => GameSimulation::with_seed(config, seed),
            None => GameSimulation::new(config),
        };

        Self {
            simulation,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            high_scores,
            clock: Instant::now(),
            flash: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick delay follows the simulation's speed, so it is re-armed
        // after every tick instead of running on a fixed interval
        let tick_timer = sleep(self.tick_delay());
        tokio::pin!(tick_timer);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        let was_playing = self.is_playing();
                        self.handle_event(event)?;
                        if self.is_playing() && !was_playing {
                            tick_timer.as_mut().reset(tokio::time::Instant::now() + self.tick_delay());
                        }
                    }
                }

                // Game logic tick
                () = &mut tick_timer, if self.is_playing() => {
                    self.update_game()?;
                    tick_timer.as_mut().reset(tokio::time::Instant::now() + self.tick_delay());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let now = self.now();
                    let snapshot = self.simulation.snapshot(now);
                    let hud = self.hud(now);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics, hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    if self.is_playing() && !self.simulation.set_direction(direction) {
                        debug!(?direction, "ignored reversing input");
                    }
                }
                KeyAction::Start => {
                    if !self.is_playing() {
                        self.start_game();
                    }
                }
                KeyAction::Restart => {
                    self.start_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let now = self.now();
        let outcome = self.simulation.tick(now);

        let Some(event) = outcome.event else {
            return Ok(());
        };

        self.metrics.on_event(event);
        self.flash = Some((event, now));

        match event {
            GameEvent::AteFood => {
                self.high_scores.record(self.simulation.score())?;
            }
            GameEvent::CollectedPowerUp(kind) => {
                info!(?kind, interval_ms = self.simulation.effective_interval_ms(), "power-up collected");
            }
            GameEvent::Died(collision) => {
                let score = self.simulation.score();
                self.metrics.on_game_over(score);
                info!(
                    ?collision,
                    score,
                    length = self.simulation.snake().len(),
                    food_eaten = self.metrics.food_eaten,
                    elapsed = %self.metrics.format_time(),
                    "run ended"
                );
            }
        }

        Ok(())
    }

    fn start_game(&mut self) {
        self.simulation.reset(self.now());
        self.metrics.on_game_start();
        self.flash = None;
        info!(
            game = self.metrics.games_played + 1,
            grid_size = self.simulation.config().grid_size,
            "run started"
        );
    }

    fn is_playing(&self) -> bool {
        self.simulation.lifecycle() == LifecycleState::Playing
    }

    fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.effective_interval_ms())
    }

    fn now(&self) -> Timestamp {
        self.clock.elapsed().as_millis() as Timestamp
    }

    fn hud(&self, now: Timestamp) -> HudInfo {
        HudInfo {
            high_score: self.high_scores.best(),
            flash: self
                .flash
                .filter(|(_, at)| now.saturating_sub(*at) < FLASH_MS)
                .map(|(event, _)| event),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    fn mode(temp_dir: &TempDir) -> HumanMode {
        let store = HighScoreStore::open(temp_dir.path().join("scores.json")).unwrap();
        HumanMode::new(GameConfig::default(), Some(9), store)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let mode = mode(&temp_dir);
        assert_eq!(mode.simulation.lifecycle(), LifecycleState::Menu);
        assert_eq!(mode.simulation.score(), 0);
        assert!(!mode.is_playing());
    }

    #[test]
    fn test_enter_starts_a_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode(&temp_dir);

        mode.handle_event(key(KeyCode::Enter)).unwrap();

        assert!(mode.is_playing());
        assert_eq!(mode.tick_delay(), Duration::from_millis(150));
    }

    #[test]
    fn test_turn_keys_queue_direction() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode(&temp_dir);
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        mode.handle_event(key(KeyCode::Char('a'))).unwrap();
        mode.handle_event(key(KeyCode::Char('d'))).unwrap();

        assert_eq!(
            mode.simulation.pending_direction(),
            crate::game::Direction::Left
        );
    }

    #[test]
    fn test_run_until_game_over_records_metrics() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode(&temp_dir);
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        while mode.is_playing() {
            mode.update_game().unwrap();
        }

        assert_eq!(mode.simulation.lifecycle(), LifecycleState::GameOver);
        assert_eq!(mode.metrics.games_played, 1);
        // The starting food sits straight ahead of the snake
        assert!(mode.simulation.score() >= 10);
        assert_eq!(mode.high_scores.best(), mode.simulation.score());
        assert_eq!(mode.metrics.session_best, mode.simulation.score());
    }

    #[test]
    fn test_restart_after_game_over() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode(&temp_dir);
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        while mode.is_playing() {
            mode.update_game().unwrap();
        }

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();

        assert!(mode.is_playing());
        assert_eq!(mode.simulation.score(), 0);
    }

    #[test]
    fn test_quit_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode(&temp_dir);

        mode.handle_event(key(KeyCode::Char('q'))).unwrap();

        assert!(mode.should_quit);
    }
}
