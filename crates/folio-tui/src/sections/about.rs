//! About section: bio, stats and the live code playground.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::{line, render_scrolled, wrapped};
use crate::common::Palette;
use crate::markdown::{Style, StyledLine, StyledSpan};
use crate::state::TuiState;

/// Title shown on the playground pane.
const PLAYGROUND_TITLE: &str = " live-code-demo.js ";

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [bio, code] = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
    } else {
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area)
    };

    let bio = bio.inner(Margin::new(1, 0));
    let lines = bio_lines(tui, usize::from(bio.width).max(1));
    render_scrolled(tui, palette, frame, bio, &lines);
    render_playground(tui, palette, frame, code);
}

fn bio_lines(tui: &TuiState, width: usize) -> Vec<StyledLine> {
    let profile = &tui.portfolio.profile;
    let mut lines = vec![
        line(vec![StyledSpan::new("About Me", Style::H2)]),
        StyledLine::empty(),
    ];
    lines.extend(wrapped(&profile.headline, Style::H3, width));
    lines.push(StyledLine::empty());

    for paragraph in &profile.about {
        lines.extend(wrapped(paragraph, Style::Text, width));
        lines.push(StyledLine::empty());
    }

    for stat in &tui.portfolio.stats {
        lines.push(line(vec![
            StyledSpan::new(format!("{:>6}  ", stat.value), Style::Strong),
            StyledSpan::new(stat.label.clone(), Style::BlockQuote),
        ]));
    }
    lines
}

fn render_playground(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.muted())
        .title(Span::styled(PLAYGROUND_TITLE, palette.accent()))
        .style(palette.code());

    let shell = &tui.playground;
    let mut text: Vec<Line> = shell
        .text()
        .split('\n')
        .enumerate()
        .map(|(i, l)| {
            Line::from(vec![
                Span::styled(format!("{:>3} ", i + 1), palette.muted()),
                Span::styled(l.to_string(), palette.code()),
            ])
        })
        .collect();
    if shell.caret_visible()
        && let Some(last) = text.last_mut()
    {
        last.push_span(Span::styled("▋", palette.accent()));
    }

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
