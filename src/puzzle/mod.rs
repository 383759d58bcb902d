//! # Puzzle Driver
//!
//! [`Puzzle`] is what a front end talks to. It owns the current settings, the
//! [`GameState`], the VIM keyboard layer, the stats history and its store,
//! and a [`Clock`]. Front ends hand it input and a [`GameObserver`]; the
//! driver calls the observer back to redraw, show guidance, and report game
//! start, applied operations and wins.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use ndarray::Array2;

use crate::config::Settings;
use crate::game::input::{Key, PointerEvent, VimInput};
use crate::game::{Action, AppliedOperation, BoardView, Event, GameError, GameState, Phase};
use crate::generator::{GenerateError, MatrixGenerator};
use crate::session::{format_clock, Clock, SystemClock};
use crate::stats::{KeyValueStore, StatRecord, StatsError, StatsHistory};

/// Quiet period before a settings change regenerates the matrix.
pub const SETTINGS_DEBOUNCE_MS: i64 = 300;

/// Presentation hooks. Every method defaults to doing nothing.
pub trait GameObserver {
    fn render(&mut self, _board: &BoardView<'_>) {}

    fn show_message(&mut self, _text: &str) {}

    fn on_game_start(&mut self) {}

    fn on_operation_applied(&mut self, _operation: &AppliedOperation, _operations: u32) {}

    fn on_win(&mut self, _elapsed: Duration, _operations: u32) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

fn generate(settings: &Settings) -> Result<Array2<f64>, GenerateError> {
    MatrixGenerator::builder()
        .rows(settings.rows)
        .cols(settings.cols)
        .seed(settings.seed)
        .source(settings.source)
        .build()
        .generate()
}

/// A seed taken from the clock: milliseconds since the Unix epoch.
pub fn clock_seed<C: Clock + ?Sized>(clock: &C) -> u64 {
    clock.now().timestamp_millis().max(1) as u64
}

pub struct Puzzle<S: KeyValueStore, C: Clock = SystemClock> {
    settings: Settings,
    state: GameState,
    vim: VimInput,
    history: StatsHistory,
    store: S,
    clock: C,
    pending: Option<(Settings, DateTime<Utc>)>,
}

impl<S: KeyValueStore, C: Clock> Puzzle<S, C> {
    pub fn new(settings: Settings, store: S, clock: C) -> anyhow::Result<Self> {
        settings.validate()?;
        let matrix = generate(&settings)?;
        let history = StatsHistory::load(&store);
        info!(
            "Loaded {} saved games; starting {} puzzle with seed {}",
            history.len(),
            settings.matrix_size(),
            settings.seed
        );
        Ok(Puzzle {
            settings,
            state: GameState::new(matrix),
            vim: VimInput::new(),
            history,
            store,
            clock,
            pending: None,
        })
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn vim(&self) -> &VimInput {
        &self.vim
    }

    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn operations(&self) -> u32 {
        self.state.operations()
    }

    pub fn elapsed(&self) -> Duration {
        self.state.elapsed(self.clock.now())
    }

    /// `MM:SS` for the live timer; poll it once a second.
    pub fn clock_text(&self) -> String {
        format_clock(self.elapsed())
    }

    pub fn board(&self) -> BoardView<'_> {
        self.state.board(self.vim.highlighted())
    }

    pub fn instructions(&self) -> String {
        if self.vim.is_active() {
            self.vim.instructions(&self.state)
        } else {
            self.state.instructions()
        }
    }

    pub fn export_csv(&self) -> Result<String, StatsError> {
        self.history.export_csv()
    }

    /// Redraws and refreshes the guidance text.
    pub fn refresh(&self, observer: &mut dyn GameObserver) {
        observer.render(&self.board());
        observer.show_message(&self.instructions());
    }

    pub fn dispatch(
        &mut self,
        action: Action,
        observer: &mut dyn GameObserver,
    ) -> Result<Vec<Event>, GameError> {
        self.run(vec![action], observer)
    }

    /// Button presses, row clicks and dialog submissions.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        observer: &mut dyn GameObserver,
    ) -> Result<Vec<Event>, GameError> {
        if matches!(event, PointerEvent::Operation(_)) {
            self.vim.exit();
        }
        match event.into_actions() {
            Ok(actions) => self.run(actions, observer),
            Err(e) => Err(self.reject(e, observer)),
        }
    }

    /// Keyboard input, VIM mode included.
    pub fn key(
        &mut self,
        key: Key,
        observer: &mut dyn GameObserver,
    ) -> Result<Vec<Event>, GameError> {
        let actions = match self.vim.translate(key, &self.state) {
            Ok(actions) => actions,
            Err(e) => return Err(self.reject(e, observer)),
        };
        if actions.is_empty() {
            self.refresh(observer);
            return Ok(Vec::new());
        }
        self.run(actions, observer)
    }

    fn run(
        &mut self,
        actions: Vec<Action>,
        observer: &mut dyn GameObserver,
    ) -> Result<Vec<Event>, GameError> {
        let now = self.clock.now();
        let mut events = Vec::new();
        for action in actions {
            match self.state.dispatch(action, now) {
                Ok(batch) => {
                    for event in &batch {
                        self.handle_event(event, now, observer);
                    }
                    events.extend(batch);
                }
                Err(e) => return Err(self.reject(e, observer)),
            }
        }

        // The keyboard layer never outlives the selection it was driving
        if matches!(self.state.phase(), Phase::Idle | Phase::Solved) {
            self.vim.exit();
        }
        self.refresh(observer);
        Ok(events)
    }

    fn handle_event(
        &mut self,
        event: &Event,
        now: DateTime<Utc>,
        observer: &mut dyn GameObserver,
    ) {
        match event {
            Event::SessionStarted => observer.on_game_start(),
            Event::Applied {
                operation,
                operations,
            } => observer.on_operation_applied(operation, *operations),
            Event::Won {
                elapsed,
                operations,
            } => {
                self.history.push(StatRecord::new(
                    now,
                    elapsed.num_milliseconds(),
                    *operations,
                    self.settings.rows,
                    self.settings.cols,
                    self.settings.seed,
                ));
                if let Err(e) = self.history.save(&mut self.store) {
                    warn!("Could not save stats: {}", e);
                }
                observer.on_win(*elapsed, *operations);
            }
            _ => {}
        }
    }

    fn reject(&mut self, error: GameError, observer: &mut dyn GameObserver) -> GameError {
        debug!("Rejected input: {}", error);
        observer.show_message(&error.to_string());
        error
    }

    fn regenerate(
        &mut self,
        settings: Settings,
        observer: &mut dyn GameObserver,
    ) -> anyhow::Result<()> {
        settings.validate()?;
        let matrix = generate(&settings)?;
        info!(
            "New {} matrix from seed {} ({} source)",
            settings.matrix_size(),
            settings.seed,
            settings.source
        );
        self.settings = settings;
        self.state = GameState::new(matrix);
        self.vim.exit();
        self.pending = None;
        self.refresh(observer);
        Ok(())
    }

    /// Fresh seed from the clock, same shape.
    pub fn new_matrix(&mut self, observer: &mut dyn GameObserver) -> anyhow::Result<()> {
        let settings = Settings {
            seed: clock_seed(&self.clock),
            ..self.settings
        };
        self.regenerate(settings, observer)
    }

    /// Replays the current seed from the start.
    pub fn new_game(&mut self, observer: &mut dyn GameObserver) -> anyhow::Result<()> {
        self.regenerate(self.settings, observer)
    }

    /// Applies new settings immediately.
    pub fn apply_settings(
        &mut self,
        settings: Settings,
        observer: &mut dyn GameObserver,
    ) -> anyhow::Result<()> {
        self.regenerate(settings, observer)
    }

    /// Queues new settings; [`Puzzle::poll_settings`] applies them once they
    /// have been left alone for [`SETTINGS_DEBOUNCE_MS`].
    pub fn request_settings(&mut self, settings: Settings) {
        self.pending = Some((settings, self.clock.now()));
    }

    /// Returns true when queued settings were applied.
    pub fn poll_settings(&mut self, observer: &mut dyn GameObserver) -> anyhow::Result<bool> {
        let Some((settings, requested_at)) = self.pending else {
            return Ok(false);
        };
        if self.clock.now() - requested_at < Duration::milliseconds(SETTINGS_DEBOUNCE_MS) {
            return Ok(false);
        }
        self.pending = None;
        self.regenerate(settings, observer)?;
        Ok(true)
    }
}
