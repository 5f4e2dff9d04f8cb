//! Interactive terminal front end
//!
//! Drives a [`GameSession`] from a tokio loop that multiplexes keyboard
//! events, the game tick and the render tick. The tick period comes from the
//! current [`Difficulty`]; autoplay runs at half the manual speed.
//!
//! # Controls
//!
//! - Arrows / WASD: steer (manual mode)
//! - Space: pause/unpause
//! - 1-3: Easy, Medium, Hard
//! - M: switch between manual and AI
//! - R: restart
//! - Q/Esc: quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::{debug, info};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::{Difficulty, Direction};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};
use crate::session::{GameSession, PlayMode};
use crate::storage::HighScoreStore;

use super::terminal::{Tui, restore_terminal, setup_terminal};

/// Render at 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct InteractiveMode<S: HighScoreStore> {
    session: GameSession<S>,
    difficulty: Difficulty,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    /// Set when the tick period must be recomputed
    retime: bool,
    pending_direction: Option<Direction>,
}

impl<S: HighScoreStore> InteractiveMode<S> {
    pub fn new(session: GameSession<S>, difficulty: Difficulty) -> Self {
        Self {
            session,
            difficulty,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            retime: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    fn tick_interval(&self) -> Duration {
        match self.session.mode() {
            PlayMode::Manual => self.difficulty.manual_interval(),
            PlayMode::Autoplay => self.difficulty.autoplay_interval(),
        }
    }

    /// First tick lands one full period from now, so retiming never grants a free step
    fn new_tick_timer(&self) -> Interval {
        let period = self.tick_interval();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.new_tick_timer();
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused && self.session.state().is_alive() {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.session.snapshot();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if std::mem::take(&mut self.retime) {
                tick_timer = self.new_tick_timer();
            }
        }

        Ok(())
    }

    fn hud(&self) -> Hud {
        Hud {
            high_score: self.session.high_score(),
            new_record: self.session.is_new_record(),
            mode: self.session.mode(),
            difficulty: self.difficulty,
            paused: self.paused,
            elapsed: self.metrics.format_time(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.pending_direction = Some(direction);
            }
            KeyAction::TogglePause => {
                self.paused = !self.paused;
            }
            KeyAction::ToggleMode => {
                let mode = self.session.mode().toggled();
                debug!("Switching to {} mode", mode.as_str());
                self.session.set_mode(mode);
                self.pending_direction = None;
                self.retime = true;
            }
            KeyAction::SetDifficulty(difficulty) => {
                if difficulty != self.difficulty {
                    debug!("Difficulty set to {}", difficulty.as_str());
                    self.difficulty = difficulty;
                    self.retime = true;
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let pending = self.pending_direction.take();
        let result = self.session.tick(pending);

        if result.ended_session() {
            self.metrics.on_game_over();
        }
    }

    fn reset_game(&mut self) {
        self.session.restart();
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Outcome};
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode(play_mode: PlayMode) -> InteractiveMode<MemoryStore> {
        let session = GameSession::new(
            GameEngine::with_seed(GameConfig::default(), 1),
            MemoryStore::new(),
            play_mode,
        );
        InteractiveMode::new(session, Difficulty::Medium)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode(PlayMode::Manual);
        assert!(mode.session.state().is_alive());
        assert_eq!(mode.session.state().score, 0);
        assert_eq!(mode.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode(PlayMode::Manual);
        mode.session.state_mut().score = 10;
        mode.session.state_mut().outcome = Some(Outcome::BoardFull);
        mode.paused = true;

        mode.reset_game();

        assert_eq!(mode.session.state().score, 0);
        assert!(mode.session.state().is_alive());
        assert!(!mode.paused);
    }

    #[test]
    fn test_key_queues_direction_until_tick() {
        let mut mode = mode(PlayMode::Manual);
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.pending_direction, Some(Direction::Up));

        mode.update_game();

        assert_eq!(mode.pending_direction, None);
        assert_eq!(mode.session.state().snake.direction, Direction::Up);
    }

    #[test]
    fn test_speed_and_mode_keys_retime() {
        let mut mode = mode(PlayMode::Manual);

        mode.handle_event(key(KeyCode::Char('3')));
        assert!(mode.retime);
        assert_eq!(mode.tick_interval(), Duration::from_millis(50));

        mode.retime = false;
        mode.handle_event(key(KeyCode::Char('m')));
        assert!(mode.retime);
        assert_eq!(mode.session.mode(), PlayMode::Autoplay);
        assert_eq!(mode.tick_interval(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retimed_timer_waits_a_full_period() {
        let mut mode = mode(PlayMode::Manual);
        mode.handle_event(key(KeyCode::Char('3')));

        let start = Instant::now();
        let mut timer = mode.new_tick_timer();
        let period = Duration::from_millis(50);
        assert_eq!(timer.period(), period);

        let early = tokio::time::timeout(period / 2, timer.tick()).await;
        assert!(early.is_err());

        let fired = timer.tick().await;
        assert_eq!(fired, start + period);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode(PlayMode::Autoplay);
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
