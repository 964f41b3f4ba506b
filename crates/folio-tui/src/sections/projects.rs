//! Projects section: list on the left, details of the selection on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

use super::{line, wrapped};
use crate::common::Palette;
use crate::markdown::{Style, StyledLine, StyledSpan};
use crate::state::TuiState;

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let projects = &tui.portfolio.projects;
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);

    tui.scroll_limit.set(0);

    let items: Vec<ListItem> = projects
        .iter()
        .map(|p| ListItem::new(Line::styled(p.title.clone(), palette.base())))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.muted())
                .title(Span::styled(" Featured Projects ", palette.title())),
        )
        .highlight_style(palette.selected())
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(
        (!projects.is_empty()).then_some(tui.selection.project.min(projects.len() - 1)),
    );
    frame.render_stateful_widget(list, list_area, &mut state);

    let Some(project) = projects.get(tui.selection.project) else {
        frame.render_widget(
            Paragraph::new(Line::styled("No projects yet.", palette.muted())),
            detail_area.inner(Margin::new(2, 1)),
        );
        return;
    };

    let detail = detail_area.inner(Margin::new(2, 1));
    let width = usize::from(detail.width).max(1);

    let mut lines = vec![
        line(vec![StyledSpan::new(project.title.clone(), Style::H2)]),
        StyledLine::empty(),
    ];
    lines.extend(wrapped(&project.description, Style::Text, width));
    lines.push(StyledLine::empty());

    let mut chips = Vec::new();
    for tech in &project.tech {
        chips.push(StyledSpan::new(format!(" {tech} "), Style::CodeInline));
        chips.push(StyledSpan::new(" ", Style::Plain));
    }
    lines.extend(super::wrap_spans(&chips, width));
    lines.push(StyledLine::empty());

    if let Some(url) = &project.demo_url {
        lines.push(line(vec![
            StyledSpan::new("Live demo  ", Style::BlockQuote),
            StyledSpan::new(url.clone(), Style::Link),
        ]));
    }
    if let Some(url) = &project.github_url {
        lines.push(line(vec![
            StyledSpan::new("Source     ", Style::BlockQuote),
            StyledSpan::new(url.clone(), Style::Link),
        ]));
    }
    if project.primary_url().is_some() {
        lines.push(StyledLine::empty());
        lines.push(line(vec![StyledSpan::new(
            "Enter to open in browser",
            Style::CodeFence,
        )]));
    }

    let text: Vec<Line> = lines.iter().map(|l| palette.line(l)).collect();
    frame.render_widget(Paragraph::new(text), detail);
}
