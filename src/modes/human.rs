use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval, sleep, sleep_until};

use crate::audio::{SoundCue, SoundEffects, sound_effects};
use crate::game::{Action, GameConfig, GameEngine, GameOverReason, GameState, StepResult};
use crate::input::{InputHandler, KeyAction, TurnBuffer};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

type Term = Terminal<CrosstermBackend<Stderr>>;

/// One play session: owns the model, its collaborators and the tick loop
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    turns: TurnBuffer,
    sound: Box<dyn SoundEffects>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let sound = sound_effects(config.sound);
        Ok(Self::with_engine(GameEngine::new(config)?, sound))
    }

    pub fn with_engine(mut engine: GameEngine, sound: Box<dyn SoundEffects>) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            turns: TurnBuffer::new(),
            sound,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
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

        let mut events = EventStream::new();

        // Run the session, restoring the terminal whatever happens
        let mut result = self.show_start_screen(&mut terminal, &mut events).await;
        if result.is_ok() && !self.should_quit {
            result = self.run_game_loop(&mut terminal, &mut events).await;
        }

        self.cleanup_terminal(&mut terminal)?;

        tracing::info!(
            score = self.state.score,
            length = self.state.snake.len(),
            steps = self.state.steps,
            reason = ?self.state.reason,
            time = %self.metrics.format_time(),
            pace = self.metrics.pace(),
            "session finished"
        );

        result
    }

    async fn show_start_screen(
        &mut self,
        terminal: &mut Term,
        events: &mut EventStream,
    ) -> Result<()> {
        let shown_for = Duration::from_millis(self.engine.config().start_screen_ms);
        if shown_for.is_zero() {
            return Ok(());
        }

        terminal
            .draw(|frame| self.renderer.render_start_screen(frame, self.engine.config()))
            .context("Failed to draw start screen")?;

        let timeout = sleep(shown_for);
        tokio::pin!(timeout);

        loop {
            tokio::select! {
                _ = &mut timeout => break,

                // Any key skips the start screen; quit keys end the session
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if self.input_handler.handle_key_event(key) == KeyAction::Quit {
                            self.should_quit = true;
                        }
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => break,
                },

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                    break;
                }
            }
        }

        terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Term,
        events: &mut EventStream,
    ) -> Result<()> {
        let config = self.engine.config();
        let tick_ms = config.tick_ms;
        let tick_interval = Duration::from_millis(tick_ms);
        let game_over_delay = Duration::from_millis(config.game_over_delay_ms);

        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Set once the game ends; the final frame stays up until then
        let mut close_at: Option<Instant> = None;

        self.metrics.on_game_start();
        self.draw(terminal)?;

        tracing::info!(tick_ms, "game loop started");

        while !self.should_quit {
            tokio::select! {
                // Handle terminal events
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => self.should_quit = true,
                },

                // One tick: update, then render
                _ = tick_timer.tick(), if close_at.is_none() => {
                    let result = self.update_game();
                    self.draw(terminal)?;

                    if result.terminated {
                        close_at = Some(Instant::now() + game_over_delay);
                    }
                }

                _ = sleep_until(close_at.unwrap_or_else(Instant::now)), if close_at.is_some() => {
                    break;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
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
            KeyAction::Steer(requested) => {
                let current = self.state.snake.direction;
                if !self.turns.request(requested, current) {
                    tracing::debug!(?requested, ?current, "reversal ignored");
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Advance the model by one tick and fire the matching sound cues
    fn update_game(&mut self) -> StepResult {
        let action = Action::from(self.turns.take());
        let result = self.engine.step(&mut self.state, action);

        if result.ate_food {
            self.metrics.on_food_eaten();
            self.sound.play(SoundCue::Eat);
        }

        if let Some(reason) = result.game_over {
            self.metrics.on_game_over();
            if reason != GameOverReason::BoardFull {
                self.sound.play(SoundCue::Lose);
            }
            tracing::info!(%reason, score = self.state.score, "game over");
        }

        result
    }

    fn draw(&mut self, terminal: &mut Term) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(&mut self, terminal: &mut Term) -> Result<()> {
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
    use crate::game::{Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<SoundCue>>>);

    impl SoundEffects for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn mode_with(recorder: Recorder) -> HumanMode {
        HumanMode::with_engine(
            GameEngine::with_seed(GameConfig::small(), 11).unwrap(),
            Box::new(recorder),
        )
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert!(mode.state().is_running());
        assert_eq!(mode.state().score, 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            tick_ms: 0,
            ..GameConfig::default()
        };
        assert!(HumanMode::new(config).is_err());
    }

    #[test]
    fn test_eat_plays_sound() {
        let recorder = Recorder::default();
        let mut mode = mode_with(recorder.clone());
        mode.state.food.position = Position::new(120, 100);

        let result = mode.update_game();

        assert!(result.ate_food);
        assert_eq!(*recorder.0.borrow(), vec![SoundCue::Eat]);
        assert_eq!(mode.metrics.foods_eaten, 1);
    }

    #[test]
    fn test_loss_plays_sound_once() {
        let recorder = Recorder::default();
        let mut mode = mode_with(recorder.clone());
        mode.state.food.position = Position::new(0, 0);

        // From the center of a 10-wide grid it takes 5 moves right to leave it
        let mut last = mode.update_game();
        while !last.terminated {
            last = mode.update_game();
        }
        mode.update_game();

        assert_eq!(last.game_over, Some(GameOverReason::Wall));
        assert_eq!(*recorder.0.borrow(), vec![SoundCue::Lose]);
        assert!(mode.metrics.finished);
    }

    #[test]
    fn test_burst_of_keys_cannot_reverse() {
        let mut mode = mode_with(Recorder::default());
        mode.state.food.position = Position::new(0, 0);

        // Moving right: Up is accepted, Left is checked against Right and dropped
        mode.handle_event(press(KeyCode::Up));
        mode.handle_event(press(KeyCode::Left));
        mode.update_game();

        assert_eq!(mode.state.snake.direction, Direction::Up);
        assert!(mode.state.is_running());
    }

    #[test]
    fn test_last_valid_key_wins() {
        let mut mode = mode_with(Recorder::default());
        mode.state.food.position = Position::new(0, 0);

        mode.handle_event(press(KeyCode::Up));
        mode.handle_event(press(KeyCode::Down));
        mode.update_game();

        assert_eq!(mode.state.snake.direction, Direction::Down);
        assert_eq!(mode.state.snake.head(), Position::new(100, 120));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode_with(Recorder::default());
        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut mode = mode_with(Recorder::default());
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        mode.handle_event(Event::Key(release));
        assert!(!mode.should_quit);
    }
}
