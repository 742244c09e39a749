use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{self, Stderr, stderr};
use tracing::info;

use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::input::{DirectionQueue, InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;
use crate::scheduler::{IntervalScheduler, Scheduler};

/// How a round of play ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    GameOver,
    /// The player asked for a new game mid-round
    Restart,
    Quit,
}

/// The player's answer to the game-over panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    Restart,
    Quit,
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    pending: DirectionQueue,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pending: DirectionQueue::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = undo_on_error(enter_terminal(), restore_terminal)?;

        let mut events = EventStream::new();
        let mut scheduler = IntervalScheduler::new(self.engine.config().tick_interval());

        // Run game loop with cleanup
        let result = self.play(&mut terminal, &mut events, &mut scheduler).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Play rounds until the player quits
    pub async fn play<B, E, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        scheduler: &mut S,
    ) -> Result<()>
    where
        B: Backend,
        E: Stream<Item = io::Result<Event>> + Unpin,
        S: Scheduler,
    {
        loop {
            match self.run_round(terminal, events, scheduler).await? {
                RoundOutcome::Quit => break,
                RoundOutcome::Restart => {}
                RoundOutcome::GameOver => match self.wait_for_choice(terminal, events).await? {
                    GameOverChoice::Restart => {}
                    GameOverChoice::Quit => break,
                },
            }

            self.start_new_game();
            scheduler.reset();
        }

        info!(
            games_played = self.metrics.games_played(),
            abandoned = self.metrics.abandoned(),
            best_score = self.metrics.best_score(),
            "quit"
        );
        Ok(())
    }

    /// Tick the current game until it ends or the player quits. Every tick
    /// mutates the state and redraws before yielding to the scheduler again.
    pub async fn run_round<B, E, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        scheduler: &mut S,
    ) -> Result<RoundOutcome>
    where
        B: Backend,
        E: Stream<Item = io::Result<Event>> + Unpin,
        S: Scheduler,
    {
        self.draw(terminal)?;

        loop {
            tokio::select! {
                biased;

                // Handle terminal events
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Some(outcome) = self.handle_event(event) {
                                return Ok(outcome);
                            }
                            self.draw(terminal)?;
                        }
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => return Ok(RoundOutcome::Quit),
                    }
                }

                // Game logic tick
                _ = scheduler.tick() => {
                    self.update_game();
                    self.draw(terminal)?;
                    if !self.state.is_running() {
                        return Ok(RoundOutcome::GameOver);
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    return Ok(RoundOutcome::Quit);
                }
            }
        }
    }

    /// Block on the game-over panel until the player restarts or quits
    pub async fn wait_for_choice<B, E>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<GameOverChoice>
    where
        B: Backend,
        E: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            let event = tokio::select! {
                maybe_event = events.next() => maybe_event,
                _ = tokio::signal::ctrl_c() => return Ok(GameOverChoice::Quit),
            };

            match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match self.input_handler.handle_key_event(key) {
                        KeyAction::Restart => return Ok(GameOverChoice::Restart),
                        KeyAction::Quit => return Ok(GameOverChoice::Quit),
                        KeyAction::Turn(_) | KeyAction::None => {}
                    }
                }
                Some(Ok(Event::Resize(..))) => self.draw(terminal)?,
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                None => return Ok(GameOverChoice::Quit),
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<RoundOutcome> {
        let Event::Key(key) = event else {
            return None;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.pending.push(self.state.snake.direction, direction);
            }
            KeyAction::Restart => return Some(RoundOutcome::Restart),
            KeyAction::Quit => return Some(RoundOutcome::Quit),
            KeyAction::None => {}
        }

        None
    }

    fn update_game(&mut self) {
        let action = Action::from(self.pending.take());
        let result = self.engine.step(&mut self.state, action);
        self.metrics.on_tick();

        if result.terminated {
            self.metrics.record(&self.state);
        }
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal
            .draw(|frame| self.renderer.render(frame, &self.state, &self.metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Replace the current game with a fresh one. A game still running is
    /// recorded as abandoned first; a finished one was recorded on its last
    /// tick.
    fn start_new_game(&mut self) {
        if self.state.is_running() {
            let record = self.metrics.record(&self.state);
            info!(score = record.score, steps = record.steps, "game abandoned");
        }
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.pending.clear();
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

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort undo of a half-finished setup; the setup error is what gets
/// reported.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stderr = stderr();
    let _ = execute!(stderr, LeaveAlternateScreen, cursor::Show);
}

fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}
