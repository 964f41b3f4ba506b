//! Skills section: one meter per skill, grouped by category.

use ratatui::Frame;
use ratatui::layout::{Margin, Rect};

use super::{line, render_scrolled};
use crate::common::{Palette, meter, truncate_with_ellipsis};
use crate::markdown::{Style, StyledLine, StyledSpan};
use crate::state::TuiState;

const NAME_WIDTH: usize = 22;
const METER_WIDTH: usize = 30;

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let area = area.inner(Margin::new(2, 0));
    let mut lines = vec![
        line(vec![StyledSpan::new("Skills & Expertise", Style::H2)]),
        StyledLine::empty(),
    ];

    let meter_width = usize::from(area.width)
        .saturating_sub(NAME_WIDTH + 6)
        .clamp(4, METER_WIDTH);

    for category in &tui.portfolio.skills {
        lines.push(line(vec![StyledSpan::new(category.title.clone(), Style::H3)]));
        for skill in &category.skills {
            let name = truncate_with_ellipsis(&skill.name, NAME_WIDTH - 1);
            lines.push(line(vec![
                StyledSpan::new(format!("  {name:<NAME_WIDTH$}"), Style::Text),
                StyledSpan::new(meter(skill.percent(), meter_width), Style::ListBullet),
                StyledSpan::new(format!(" {:>3}%", skill.percent()), Style::BlockQuote),
            ]));
        }
        lines.push(StyledLine::empty());
    }

    render_scrolled(tui, palette, frame, area, &lines);
}
