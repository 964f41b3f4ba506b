//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── section / scroll         (navigation)
//! │   ├── playground: TypewriterShell  (About pane, mounted while visible)
//! │   ├── terminal: TypewriterShell    (terminal modal, mounted while open)
//! │   ├── testimonials: TestimonialsState
//! │   └── contact: ContactState
//! └── overlay: Option<Overlay>
//! ```
//!
//! Both typewriter shells live in `TuiState` so closing an overlay or leaving
//! a section can unmount them synchronously inside the reducer.

use std::cell::Cell;
use std::time::Instant;

use folio_core::config::Config;
use folio_core::content::Portfolio;
use folio_core::shell::TypewriterShell;
use folio_core::theme::Theme;
use folio_core::typewriter::ConfigError;

use crate::overlays::Overlay;
use crate::sections::Section;
use crate::sections::contact::ContactState;
use crate::sections::testimonials::TestimonialsState;

/// Combined application state.
///
/// Split so overlay handlers can borrow the overlay mutably next to `&TuiState`.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Builds the initial state and activates the first section.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a configured typewriter interval is zero.
    pub fn new(config: Config, portfolio: Portfolio, now: Instant) -> Result<Self, ConfigError> {
        let mut tui = TuiState::new(config, portfolio, now)?;
        tui.enter_section(tui.section);
        Ok(Self { tui, overlay: None })
    }
}

/// Selection cursors for the list-style sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub social: usize,
    pub project: usize,
    pub post: usize,
}

/// Non-overlay UI state.
pub struct TuiState {
    pub should_quit: bool,
    /// Instant of the current loop iteration.
    pub now: Instant,
    pub width: u16,
    pub height: u16,
    /// Set when something changed since the last draw.
    pub dirty: bool,
    pub config: Config,
    pub portfolio: Portfolio,
    pub theme: Theme,
    pub section: Section,
    /// Vertical offset for scrollable sections. Reset on section change.
    pub scroll: u16,
    /// Largest useful `scroll` for the current section (set during render).
    pub scroll_limit: Cell<u16>,
    pub selection: Selection,
    pub playground: TypewriterShell,
    pub terminal: TypewriterShell,
    pub testimonials: TestimonialsState,
    pub contact: ContactState,
}

impl TuiState {
    /// # Errors
    /// Returns [`ConfigError`] if a configured typewriter interval is zero.
    pub fn new(config: Config, portfolio: Portfolio, now: Instant) -> Result<Self, ConfigError> {
        let playground = TypewriterShell::playground(portfolio.playground_script(), &config)?;
        let terminal = TypewriterShell::terminal(portfolio.terminal_script(), &config)?;
        let testimonials =
            TestimonialsState::new(portfolio.testimonials.len(), config.testimonial_interval());

        Ok(Self {
            should_quit: false,
            now,
            width: 0,
            height: 0,
            dirty: true,
            theme: config.theme,
            config,
            portfolio,
            section: Section::default(),
            scroll: 0,
            scroll_limit: Cell::new(0),
            selection: Selection::default(),
            playground,
            terminal,
            testimonials,
            contact: ContactState::default(),
        })
    }

    /// Switches sections, tearing down the old one's timers first.
    pub fn set_section(&mut self, section: Section) {
        if section == self.section {
            return;
        }
        self.leave_section(self.section);
        self.section = section;
        self.scroll = 0;
        self.scroll_limit.set(0);
        self.enter_section(section);
        self.dirty = true;
    }

    pub(crate) fn enter_section(&mut self, section: Section) {
        let now = self.now;
        match section {
            Section::About => {
                self.playground.mount(now);
            }
            Section::Testimonials => self.testimonials.activate(now),
            _ => {}
        }
    }

    fn leave_section(&mut self, section: Section) {
        match section {
            Section::About => self.playground.unmount(),
            Section::Testimonials => self.testimonials.deactivate(),
            Section::Contact => self.contact.editing = false,
            _ => {}
        }
    }

    /// Runs every timer due at `self.now`.
    ///
    /// Returns true if anything visible changed.
    pub fn poll_timers(&mut self) -> bool {
        let now = self.now;
        let mut changed = false;
        if self.playground.is_mounted() {
            let caret = self.playground.caret_visible();
            changed |= !self.playground.poll(now).is_empty();
            changed |= caret != self.playground.caret_visible();
        }
        if self.terminal.is_mounted() {
            let caret = self.terminal.caret_visible();
            changed |= !self.terminal.poll(now).is_empty();
            changed |= caret != self.terminal.caret_visible();
        }
        changed |= self.testimonials.poll(now);
        changed
    }

    /// Earliest instant at which [`poll_timers`](Self::poll_timers) has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.playground.next_deadline(),
            self.terminal.next_deadline(),
            self.testimonials.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}
