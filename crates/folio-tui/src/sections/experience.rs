//! Experience timeline: work and education entries in listed order.

use folio_core::content::ExperienceKind;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};

use super::{line, render_scrolled};
use crate::common::Palette;
use crate::markdown::{Style, StyledLine, StyledSpan, WrapOptions, wrap_styled_spans};
use crate::state::TuiState;

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let area = area.inner(Margin::new(2, 0));
    let width = usize::from(area.width).max(8);

    let mut lines = vec![
        line(vec![StyledSpan::new("Experience & Education", Style::H2)]),
        StyledLine::empty(),
    ];

    let entries = &tui.portfolio.experience;
    for (i, entry) in entries.iter().enumerate() {
        let tag = match entry.kind {
            ExperienceKind::Work => "work",
            ExperienceKind::Education => "education",
        };
        lines.push(line(vec![
            StyledSpan::new("● ", Style::ListBullet),
            StyledSpan::new(entry.title.clone(), Style::Strong),
            StyledSpan::new(format!("  [{tag}]"), Style::CodeFence),
        ]));
        lines.push(line(vec![
            StyledSpan::new("│ ", Style::QuoteMarker),
            StyledSpan::new(entry.company.clone(), Style::H3),
            StyledSpan::new(format!(" · {}", entry.period), Style::BlockQuote),
        ]));

        let rail = vec![StyledSpan::new("│ ", Style::QuoteMarker)];
        let opts = WrapOptions::new(width).with_prefix(rail);
        lines.extend(wrap_styled_spans(
            &[StyledSpan::new(entry.description.clone(), Style::Text)],
            &opts,
        ));
        if i + 1 < entries.len() {
            lines.push(line(vec![StyledSpan::new("│", Style::QuoteMarker)]));
        }
    }

    render_scrolled(tui, palette, frame, area, &lines);
}
