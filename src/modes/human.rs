use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info, trace, warn};

use crate::game::{Action, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Play snake at the keyboard
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_actions: Vec<Action>,
    /// Bare Shift/Ctrl press waiting to see whether it starts a chord
    held_modifier: Option<(KeyCode, Action)>,
    title: String,
    keyboard_enhanced: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Self {
        let input_handler = InputHandler::new(&engine.config().speed_control);
        let title = engine.take_title().unwrap_or_else(|| engine.title());

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler,
            should_quit: false,
            pending_actions: Vec::new(),
            held_modifier: None,
            title,
            keyboard_enhanced: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = match self.setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                self.restore_after_failed_setup();
                return Err(err);
            }
        };

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    fn setup_terminal(&mut self) -> Result<Terminal<CrosstermBackend<Stderr>>> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        // Bare Shift/Ctrl presses are only reported with keyboard enhancement
        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .context("Failed to enable keyboard enhancement")?;
            self.keyboard_enhanced = true;
        } else {
            warn!("terminal does not report modifier keys, use +/- to change speed");
        }

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    /// Undo whatever part of `setup_terminal` got done. Errors are ignored,
    /// the setup error is the one worth reporting.
    fn restore_after_failed_setup(&mut self) {
        let mut stderr = stderr();
        if self.keyboard_enhanced {
            let _ = execute!(stderr, PopKeyboardEnhancementFlags);
            self.keyboard_enhanced = false;
        }
        let _ = execute!(stderr, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One tick per 1/speed seconds, rebuilt whenever the speed changes
        let mut tick_timer = tick_timer(self.engine.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                    let period = self.engine.tick_interval();
                    if period != tick_timer.period() {
                        tick_timer = tick_timer_at(Instant::now() + period, period);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.title, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(ticks = self.engine.ticks(), "quit");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // A bare modifier counts when it is released without another key
        // having joined it, so Shift+Up or Shift++ do not change the speed
        if key.kind == KeyEventKind::Release {
            if matches!(self.held_modifier, Some((code, _)) if code == key.code) {
                if let Some((_, action)) = self.held_modifier.take() {
                    self.pending_actions.push(action);
                }
            }
            return;
        }

        // Only process key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            return;
        }

        let is_modifier = matches!(key.code, KeyCode::Modifier(_));
        if !is_modifier {
            self.held_modifier = None;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) if is_modifier => {
                self.held_modifier = Some((key.code, action));
            }
            KeyAction::GameAction(action) => self.pending_actions.push(action),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let report = self.engine.tick(&self.pending_actions);
        self.pending_actions.clear();

        if report.board_cleared {
            debug!(cause = ?report.reset, "board cleared");
        }
        if let Some(cell) = report.vacated {
            trace!(x = cell.x, y = cell.y, "tail vacated");
        }
        self.metrics.on_tick(&report);

        if let Some(title) = self.engine.take_title() {
            self.title = title;
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if self.keyboard_enhanced {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to disable keyboard enhancement")?;
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn tick_timer(period: Duration) -> Interval {
    tick_timer_at(Instant::now(), period)
}

fn tick_timer_at(start: Instant, period: Duration) -> Interval {
    let mut timer = interval_at(start, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
