//! Modal overlays.
//!
//! Overlays take over keyboard input while open. Each owns its state, key
//! handler and render function.
//!
//! - `terminal_modal.rs`: scripted terminal session (`t`)
//! - `blog_post.rs`: blog post reader (Enter on the Blog section)
//! - `render_utils.rs`: shared container and hint rendering

pub mod blog_post;
pub mod render_utils;
pub mod terminal_modal;

pub use blog_post::BlogPostState;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use terminal_modal::TerminalModalState;

use crate::common::Palette;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Requests to open an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Terminal,
    BlogPost { id: u32 },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }
}

#[derive(Debug)]
pub enum Overlay {
    Terminal(TerminalModalState),
    BlogPost(BlogPostState),
}

impl Overlay {
    pub fn render(&self, tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Terminal(t) => t.render(tui, palette, frame, area),
            Overlay::BlogPost(p) => p.render(tui, palette, frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Terminal(t) => t.handle_key(key),
            Overlay::BlogPost(p) => p.handle_key(key),
        }
    }
}

/// Opens the requested overlay, mounting whatever it displays.
pub fn open_overlay(tui: &mut TuiState, overlay: &mut Option<Overlay>, request: OverlayRequest) {
    close_overlay(tui, overlay);
    *overlay = Some(match request {
        OverlayRequest::Terminal => {
            tui.terminal.mount(tui.now);
            Overlay::Terminal(TerminalModalState)
        }
        OverlayRequest::BlogPost { id } => Overlay::BlogPost(BlogPostState::open(id)),
    });
    tui.dirty = true;
}

/// Closes the active overlay. The terminal typewriter is unmounted so its
/// timers stop and the next open starts over.
pub fn close_overlay(tui: &mut TuiState, overlay: &mut Option<Overlay>) {
    if let Some(Overlay::Terminal(_)) = overlay.take() {
        tui.terminal.unmount();
    }
    tui.dirty = true;
}

/// Routes a key to the active overlay.
///
/// Returns `None` when no overlay is open.
pub fn handle_overlay_key(
    tui: &mut TuiState,
    overlay: &mut Option<Overlay>,
    key: KeyEvent,
) -> Option<Vec<UiEffect>> {
    let update = overlay.as_mut()?.handle_key(key);
    if matches!(update.transition, OverlayTransition::Close) {
        close_overlay(tui, overlay);
    }
    Some(update.effects)
}
