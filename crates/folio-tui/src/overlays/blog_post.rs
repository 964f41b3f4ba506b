//! Full-screen reader for a single blog post.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::common::Palette;
use crate::sections::blog::post_lines;
use crate::state::TuiState;

const MAX_WIDTH: u16 = 100;
const PAGE: u16 = 10;

#[derive(Debug)]
pub struct BlogPostState {
    pub post_id: u32,
    pub scroll: u16,
    /// Largest useful `scroll` (set during render).
    max_scroll: Cell<u16>,
}

impl BlogPostState {
    pub fn open(post_id: u32) -> Self {
        Self {
            post_id,
            scroll: 0,
            max_scroll: Cell::new(u16::MAX),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let max = self.max_scroll.get();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => return OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = (self.scroll + 1).min(max),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll = self.scroll.saturating_add(PAGE).min(max);
            }
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = max,
            _ => {}
        }
        OverlayUpdate::stay()
    }

    pub fn render(&self, tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
        let post = tui.portfolio.post(self.post_id);
        let hints = [
            InputHint::new("↑↓", "scroll"),
            InputHint::new("PgUp/PgDn", "page"),
            InputHint::new("Esc", "back"),
        ];
        let layout = render_overlay(
            frame,
            area,
            palette,
            &OverlayConfig {
                title: "Blog",
                width: MAX_WIDTH,
                height: area.height,
                hints: &hints,
            },
        );

        let body = layout.body.inner(Margin::new(2, 1));
        let lines = post_lines(post, usize::from(body.width).max(1));
        let max = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(body.height);
        self.max_scroll.set(max);

        let text: Vec<Line> = lines.iter().map(|l| palette.line(l)).collect();
        frame.render_widget(
            Paragraph::new(text).scroll((self.scroll.min(max), 0)),
            body,
        );
    }
}
