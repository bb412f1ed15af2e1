use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Screen};

/// Ticks per second at score zero
pub const BASE_TICK_RATE: u32 = 10;

/// Score needed for each extra tick per second
pub const POINTS_PER_SPEEDUP: u32 = 30;

/// Tick period for a given score: one extra tick per second for every
/// [`POINTS_PER_SPEEDUP`] points, up to twice the base rate
pub fn tick_interval(score: u32) -> Duration {
    let rate = (BASE_TICK_RATE + score / POINTS_PER_SPEEDUP).min(BASE_TICK_RATE * 2);
    Duration::from_millis(1000 / u64::from(rate))
}

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    screen: Screen,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to start game session")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            screen: Screen::Menu,
            should_quit: false,
        })
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

        let mut tick_period = tick_interval(self.engine.score());
        let mut tick_timer = interval(tick_period);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.update_game();
                    }

                    let period = tick_interval(self.engine.score());
                    if period != tick_period {
                        debug!("tick period now {:?}", period);
                        tick_period = period;
                        tick_timer = Self::restart_timer(period);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics, self.screen);
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

    fn restart_timer(period: Duration) -> Interval {
        interval_at(Instant::now() + period, period)
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                if self.screen == Screen::Playing && !self.engine.set_direction(direction) {
                    debug!("ignored reversing turn to {:?}", direction);
                }
            }
            KeyAction::Start => {
                if self.screen == Screen::Menu {
                    self.start_game();
                }
            }
            KeyAction::Restart => {
                self.reset_game();
                self.start_game();
            }
            KeyAction::Menu => {
                self.reset_game();
                self.screen = Screen::Menu;
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.tick();
        self.metrics.on_tick(&result);

        // Track game over
        if result.ended() {
            self.metrics.on_game_over(self.engine.score());
            self.screen = Screen::GameOver;
        }
    }

    fn start_game(&mut self) {
        self.metrics.on_game_start();
        self.screen = if self.engine.is_over() {
            Screen::GameOver
        } else {
            Screen::Playing
        };
    }

    fn reset_game(&mut self) {
        self.engine.reset();
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
