//! Testimonials carousel.
//!
//! While the section is visible the carousel advances on a fixed interval.
//! Manual navigation moves the slide without resetting the rotation timer.

use std::time::{Duration, Instant};

use folio_core::carousel::Carousel;
use folio_core::scheduler::Scheduler;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::wrapped;
use crate::common::Palette;
use crate::markdown::Style;
use crate::state::TuiState;

#[derive(Debug)]
pub struct TestimonialsState {
    pub carousel: Carousel,
    interval: Option<Duration>,
    timers: Scheduler<()>,
}

impl TestimonialsState {
    pub fn new(len: usize, interval: Option<Duration>) -> Self {
        Self {
            carousel: Carousel::new(len),
            interval,
            timers: Scheduler::new(),
        }
    }

    /// Starts automatic rotation from `now`.
    pub fn activate(&mut self, now: Instant) {
        self.timers.cancel_all();
        if let Some(interval) = self.interval
            && self.carousel.len() > 1
        {
            self.timers.schedule((), now + interval);
        }
    }

    pub fn deactivate(&mut self) {
        self.timers.cancel_all();
    }

    pub fn is_rotating(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Advances once per elapsed interval. Returns true if the slide moved.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut moved = false;
        while let Some(due) = self.timers.pop_due(now) {
            self.carousel.next();
            moved = true;
            if let Some(interval) = self.interval {
                self.timers.schedule((), due.at + interval);
            }
        }
        moved
    }
}

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let testimonials = &tui.portfolio.testimonials;
    let carousel = &tui.testimonials.carousel;

    let [heading, card, dots] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled("What People Say", palette.title())).alignment(Alignment::Center),
        heading,
    );

    let Some(current) = testimonials.get(carousel.index()) else {
        frame.render_widget(
            Paragraph::new(Line::styled("No testimonials yet.", palette.muted()))
                .alignment(Alignment::Center),
            card,
        );
        return;
    };

    let card = centered_width(card, 72);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.muted());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let width = usize::from(inner.width.saturating_sub(2)).max(1);
    let mut lines: Vec<Line> = wrapped(&format!("“{}”", current.content), Style::Emphasis, width)
        .iter()
        .map(|l| palette.line(l))
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(current.name.clone(), palette.title()));
    lines.push(Line::styled(
        format!("{} · {}", current.role, current.company),
        palette.muted(),
    ));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::NONE)),
        inner,
    );

    let mut spans: Vec<Span> = (0..carousel.len())
        .map(|i| {
            if i == carousel.index() {
                Span::styled("● ", palette.accent())
            } else {
                Span::styled("○ ", palette.muted())
            }
        })
        .collect();
    spans.push(Span::styled(
        format!(" {}/{}", carousel.index() + 1, carousel.len()),
        palette.muted(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), dots);
}

fn centered_width(area: Rect, max: u16) -> Rect {
    let width = area.width.min(max);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_rotates_on_interval_and_wraps() {
        let base = Instant::now();
        let mut state = TestimonialsState::new(3, Some(ms(5000)));
        state.activate(base);

        assert!(!state.poll(base + ms(4999)));
        assert!(state.poll(base + ms(5000)));
        assert_eq!(state.carousel.index(), 1);
        // Two intervals elapsed at once: both fire.
        assert!(state.poll(base + ms(15_000)));
        assert_eq!(state.carousel.index(), 0);
    }

    #[test]
    fn test_manual_navigation_keeps_timer() {
        let base = Instant::now();
        let mut state = TestimonialsState::new(4, Some(ms(5000)));
        state.activate(base);
        state.carousel.prev();
        assert_eq!(state.carousel.index(), 3);
        assert_eq!(state.next_deadline(), Some(base + ms(5000)));
        state.poll(base + ms(5000));
        assert_eq!(state.carousel.index(), 0);
    }

    #[test]
    fn test_deactivate_stops_rotation() {
        let base = Instant::now();
        let mut state = TestimonialsState::new(3, Some(ms(5000)));
        state.activate(base);
        state.deactivate();
        assert!(!state.is_rotating());
        assert!(!state.poll(base + ms(60_000)));
        assert_eq!(state.carousel.index(), 0);
    }

    #[test]
    fn test_single_slide_or_disabled_never_rotates() {
        let base = Instant::now();
        let mut single = TestimonialsState::new(1, Some(ms(5000)));
        single.activate(base);
        assert!(!single.is_rotating());

        let mut disabled = TestimonialsState::new(3, None);
        disabled.activate(base);
        assert!(!disabled.is_rotating());
    }
}
