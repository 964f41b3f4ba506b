//! Landing section: name, role, tagline and social links.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::Palette;
use crate::state::TuiState;

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let profile = &tui.portfolio.profile;

    let mut lines = vec![
        Line::styled(
            format!("[ {} ]", profile.initials),
            palette.accent().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(vec![
            Span::styled("Hi, I'm ", palette.base()),
            Span::styled(profile.name.clone(), palette.title()),
        ]),
        Line::styled(profile.role.clone(), palette.accent()),
        Line::default(),
        Line::styled(profile.tagline.clone(), palette.base()),
        Line::styled(format!("📍 {}", profile.location), palette.muted()),
        Line::default(),
    ];

    for (i, link) in tui.portfolio.social.iter().enumerate() {
        let label = format!(" {} ", link.label);
        if i == tui.selection.social {
            lines.push(Line::from(vec![
                Span::styled("▸", palette.accent()),
                Span::styled(label, palette.selected()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled(label, palette.muted()),
            ]));
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        "Enter open link · t terminal · → explore",
        palette.muted(),
    ));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    tui.scroll_limit.set(0);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}
