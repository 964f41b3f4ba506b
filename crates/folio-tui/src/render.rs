//! Pure view functions.
//!
//! Everything here takes `&AppState` and draws to a frame. Nothing mutates
//! state except the render-time scroll limits kept in `Cell`s.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::common::Palette;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::sections::{self, Section};
use crate::state::{AppState, TuiState};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

/// Renders the entire UI.
pub fn render(app: &AppState, frame: &mut Frame) {
    let tui = &app.tui;
    let palette = Palette::for_theme(tui.theme);
    let area = frame.area();

    frame.render_widget(Block::default().style(palette.base()), area);

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    render_header(tui, &palette, frame, header);
    sections::render(tui, &palette, frame, body.inner(Margin::new(1, 1)));
    render_footer(app, &palette, frame, footer);

    if let Some(overlay) = &app.overlay {
        overlay.render(tui, &palette, frame, body);
    }
}

fn render_header(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.muted());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name = format!(" {} ", tui.portfolio.profile.initials);
    let name_width = u16::try_from(name.len()).unwrap_or(0) + 1;
    let [brand, tabs_area, mode] = Layout::horizontal([
        Constraint::Length(name_width),
        Constraint::Min(10),
        Constraint::Length(9),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(Span::styled(name, palette.selected())), brand);

    let titles = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())));
    let tabs = Tabs::new(titles)
        .select(tui.section.index())
        .style(palette.muted())
        .highlight_style(palette.title())
        .divider(Span::styled("│", palette.muted()));
    frame.render_widget(tabs, tabs_area);

    let theme = if tui.theme.is_dark() { "☾ dark" } else { "☀ light" };
    frame.render_widget(
        Paragraph::new(Span::styled(theme, palette.accent())).alignment(Alignment::Right),
        mode,
    );
}

fn render_footer(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let tui = &app.tui;
    if app.overlay.is_some() {
        frame.render_widget(
            Paragraph::new(Span::styled(tui.portfolio.profile.footer.clone(), palette.muted()))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let hints: &[InputHint] = match tui.section {
        Section::Contact if tui.contact.editing => &[
            InputHint::new("Tab", "next field"),
            InputHint::new("Ctrl-S", "send"),
            InputHint::new("Esc", "done"),
        ],
        Section::Testimonials => &[
            InputHint::new("←/→", "sections"),
            InputHint::new("h/l", "browse"),
            InputHint::new("t", "terminal"),
            InputHint::new("d", "theme"),
            InputHint::new("q", "quit"),
        ],
        Section::Home | Section::Projects | Section::Blog | Section::Contact => &[
            InputHint::new("←/→", "sections"),
            InputHint::new("↑/↓", "select"),
            InputHint::new("Enter", "open"),
            InputHint::new("t", "terminal"),
            InputHint::new("d", "theme"),
            InputHint::new("q", "quit"),
        ],
        Section::About | Section::Skills | Section::Experience => &[
            InputHint::new("←/→", "sections"),
            InputHint::new("↑/↓", "scroll"),
            InputHint::new("t", "terminal"),
            InputHint::new("d", "theme"),
            InputHint::new("q", "quit"),
        ],
    };
    frame.render_widget(
        Paragraph::new(hint_line(hints, palette)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use folio_core::config::Config;
    use folio_core::content::Portfolio;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Cell;

    use super::*;
    use crate::overlays::{OverlayRequest, open_overlay};

    fn app() -> AppState {
        AppState::new(Config::default(), Portfolio::builtin().unwrap(), Instant::now()).unwrap()
    }

    fn draw(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_section_renders() {
        let mut app = app();
        for section in Section::ALL {
            app.tui.set_section(section);
            let screen = draw(&app, 120, 40);
            assert!(screen.contains(section.title()), "{section:?}");
        }
    }

    #[test]
    fn test_home_shows_profile_name() {
        let app = app();
        let screen = draw(&app, 120, 40);
        assert!(screen.contains(&app.tui.portfolio.profile.name));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app();
        for section in Section::ALL {
            app.tui.set_section(section);
            draw(&app, 10, 4);
        }
        let AppState { tui, overlay } = &mut app;
        open_overlay(tui, overlay, OverlayRequest::BlogPost { id: 99 });
        draw(&app, 10, 4);
    }

    #[test]
    fn test_unknown_post_overlay_says_not_found() {
        let mut app = app();
        let AppState { tui, overlay } = &mut app;
        open_overlay(tui, overlay, OverlayRequest::BlogPost { id: 99 });
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("Post not found"));
    }

    #[test]
    fn test_narrow_terminal_modal_shows_latest_line() {
        let mut app = app();
        let AppState { tui, overlay } = &mut app;
        open_overlay(tui, overlay, OverlayRequest::Terminal);
        tui.now += Duration::from_secs(120);
        tui.poll_timers();
        assert!(tui.terminal.state().is_complete);

        let screen = draw(&app, 40, 18);
        assert!(screen.contains("~$ _"), "{screen}");
    }
}
