//! Portfolio sections.
//!
//! One module per section. Each exposes a pure `render` function taking the
//! state and the palette; sections with their own interaction state also
//! keep it here.

pub mod about;
pub mod blog;
pub mod contact;
pub mod experience;
pub mod home;
pub mod projects;
pub mod skills;
pub mod testimonials;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::common::Palette;
use crate::markdown::{Style, StyledLine, StyledSpan, WrapOptions, wrap_styled_spans};
use crate::state::TuiState;

/// Page of the portfolio, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Testimonials,
    Blog,
    Contact,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Experience,
        Section::Testimonials,
        Section::Blog,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Experience => "Experience",
            Section::Testimonials => "Testimonials",
            Section::Blog => "Blog",
            Section::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Section for a 0-based position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Draws the active section.
pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    match tui.section {
        Section::Home => home::render(tui, palette, frame, area),
        Section::About => about::render(tui, palette, frame, area),
        Section::Skills => skills::render(tui, palette, frame, area),
        Section::Projects => projects::render(tui, palette, frame, area),
        Section::Experience => experience::render(tui, palette, frame, area),
        Section::Testimonials => testimonials::render(tui, palette, frame, area),
        Section::Blog => blog::render(tui, palette, frame, area),
        Section::Contact => contact::render(tui, palette, frame, area),
    }
}

/// Wraps plain text in a single semantic style.
pub(crate) fn wrapped(text: &str, style: Style, width: usize) -> Vec<StyledLine> {
    wrap_styled_spans(&[StyledSpan::new(text, style)], &WrapOptions::new(width))
}

/// Wraps already styled spans.
pub(crate) fn wrap_spans(spans: &[StyledSpan], width: usize) -> Vec<StyledLine> {
    wrap_styled_spans(spans, &WrapOptions::new(width))
}

/// Single-line helper.
pub(crate) fn line(spans: Vec<StyledSpan>) -> StyledLine {
    StyledLine { spans }
}

/// Renders pre-wrapped lines with the shared section scroll offset and
/// records how far that offset may go.
pub(crate) fn render_scrolled(
    tui: &TuiState,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    lines: &[StyledLine],
) {
    let max = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(area.height);
    tui.scroll_limit.set(max);
    let offset = tui.scroll.min(max);

    let text: Vec<_> = lines.iter().map(|l| palette.line(l)).collect();
    frame.render_widget(Paragraph::new(text).scroll((offset, 0)), area);
}
