//! Blog section: post list, plus the post body shared with the overlay and
//! the `folio blog` command.

use folio_core::content::BlogPost;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::{line, wrapped};
use crate::common::Palette;
use crate::markdown::{Style, StyledLine, StyledSpan, render_markdown};
use crate::state::TuiState;

/// Text shown for an unknown post id.
pub const POST_NOT_FOUND: &str = "Post not found";

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let area = area.inner(Margin::new(2, 0));
    let width = usize::from(area.width).max(8);
    let posts = &tui.portfolio.blog;

    let mut lines = vec![
        line(vec![StyledSpan::new("Latest Articles", Style::H2)]),
        StyledLine::empty(),
    ];
    if posts.is_empty() {
        lines.push(line(vec![StyledSpan::new("Nothing published yet.", Style::BlockQuote)]));
    }

    let mut selected_end = 0;
    for (i, post) in posts.iter().enumerate() {
        let selected = i == tui.selection.post;
        let marker = if selected { "▸ " } else { "  " };
        let title_style = if selected { Style::H3 } else { Style::Strong };
        lines.push(line(vec![
            StyledSpan::new(marker, Style::ListBullet),
            StyledSpan::new(post.title.clone(), title_style),
        ]));
        lines.push(line(vec![StyledSpan::new(
            format!("  {} · {}", post.display_date(), post.read_time),
            Style::BlockQuote,
        )]));
        for mut excerpt in wrapped(&post.excerpt, Style::Text, width.saturating_sub(2)) {
            excerpt.spans.insert(0, StyledSpan::new("  ", Style::Plain));
            lines.push(excerpt);
        }
        if selected {
            selected_end = lines.len();
        }
        lines.push(StyledLine::empty());
    }

    // Up/Down move the selection here, so scroll just far enough to show it.
    tui.scroll_limit.set(0);
    let offset = u16::try_from(selected_end)
        .unwrap_or(u16::MAX)
        .saturating_sub(area.height);
    let text: Vec<Line> = lines.iter().map(|l| palette.line(l)).collect();
    frame.render_widget(Paragraph::new(text).scroll((offset, 0)), area);
}

/// Header and rendered markdown body of a post.
pub fn post_lines(post: Option<&BlogPost>, width: usize) -> Vec<StyledLine> {
    let Some(post) = post else {
        return vec![
            line(vec![StyledSpan::new(POST_NOT_FOUND, Style::H1)]),
            StyledLine::empty(),
            line(vec![StyledSpan::new(
                "The article you're looking for doesn't exist.",
                Style::BlockQuote,
            )]),
        ];
    };

    let mut lines = wrapped(&post.title, Style::H1, width);
    lines.push(line(vec![StyledSpan::new(
        format!("{} · {}", post.display_date(), post.read_time),
        Style::BlockQuote,
    )]));
    lines.push(StyledLine::empty());
    lines.extend(render_markdown(&post.content, width));
    lines
}
