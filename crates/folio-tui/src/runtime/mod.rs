//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer mutates state and returns
//! effects; this module performs them.

use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use folio_core::config::Config;
use folio_core::contact::{ContactMessage, ContactTransport, LogTransport};
use folio_core::content::Portfolio;
use folio_core::theme::Theme;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while something is animating (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when nothing is animating.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// The terminal is restored on drop.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Where `PersistTheme` writes.
    config_path: PathBuf,
    transport: Box<dyn ContactTransport>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Builds the state, then takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the terminal
    /// cannot be set up.
    pub fn new(config: Config, portfolio: Portfolio, config_path: PathBuf) -> Result<Self> {
        Self::with_transport(config, portfolio, config_path, Box::new(LogTransport))
    }

    /// Same as [`new`](Self::new) with a custom contact transport.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the terminal
    /// cannot be set up.
    pub fn with_transport(
        config: Config,
        portfolio: Portfolio,
        config_path: PathBuf,
        transport: Box<dyn ContactTransport>,
    ) -> Result<Self> {
        let now = Instant::now();
        let state = AppState::new(config, portfolio, now).context("Invalid configuration")?;

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            state,
            config_path,
            transport,
            last_tick: now,
        })
    }

    /// Runs the event loop until quit.
    ///
    /// # Errors
    /// Returns an error if reading terminal events or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                    now: Instant::now(),
                },
            );

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if self.state.tui.dirty && !self.state.tui.should_quit {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                self.state.tui.dirty = false;
            }
        }
        Ok(())
    }

    /// Blocks until terminal input arrives or the next tick is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let deadline = self.state.tui.next_deadline();
        let tick_interval = if deadline.is_some() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let mut poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());
        if let Some(deadline) = deadline {
            poll_duration = poll_duration.min(deadline.saturating_duration_since(Instant::now()));
        }

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        let timer_due = deadline.is_some_and(|d| d <= Instant::now());
        if timer_due || self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                debug!(%url, "opening link");
                if let Err(err) = open::that_detached(&url) {
                    warn!(%url, error = %err, "failed to open link");
                }
            }
            UiEffect::PersistTheme { theme } => self.persist_theme(theme),
            UiEffect::SubmitContact { message } => {
                let event = self.submit_contact(&message);
                self.dispatch_event(event);
            }
        }
    }

    fn persist_theme(&self, theme: Theme) {
        if let Err(err) = Config::save_theme_to(&self.config_path, theme) {
            warn!(error = %format!("{err:#}"), "failed to persist theme");
        }
    }

    fn submit_contact(&self, message: &ContactMessage) -> UiEvent {
        let result = self.transport.send(message).map_err(|err| {
            warn!(error = %format!("{err:#}"), "contact delivery failed");
            format!("{err:#}")
        });
        UiEvent::ContactSent { result }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
