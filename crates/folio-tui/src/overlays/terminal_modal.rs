//! Terminal modal: replays the scripted shell session.
//!
//! The typewriter itself lives in `TuiState::terminal`. It is mounted when the
//! modal opens and unmounted when it closes, so reopening replays from the
//! first line.

use std::mem;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::common::Palette;
use crate::state::TuiState;

const WIDTH: u16 = 84;
const HEIGHT: u16 = 26;

#[derive(Debug, Default)]
pub struct TerminalModalState;

impl TerminalModalState {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 't') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("Esc", "close")];
        let layout = render_overlay(
            frame,
            area,
            palette,
            &OverlayConfig {
                title: "Terminal",
                width: WIDTH,
                height: HEIGHT,
                hints: &hints,
            },
        );

        let shell = &tui.terminal;
        let mut lines: Vec<Line> = shell
            .text()
            .split('\n')
            .map(|l| terminal_line(l, palette))
            .collect();
        if shell.caret_visible()
            && let Some(last) = lines.last_mut()
        {
            last.push_span(Span::styled("█", palette.accent()));
        }

        // Follow the newest output, counted in screen rows.
        let width = usize::from(layout.body.width);
        let rows: Vec<Line> = lines
            .into_iter()
            .flat_map(|line| hard_wrap(line, width))
            .collect();
        let skip = rows.len().saturating_sub(usize::from(layout.body.height));
        let visible: Vec<Line> = rows.into_iter().skip(skip).collect();

        frame.render_widget(Paragraph::new(visible).style(palette.code()), layout.body);
    }
}

/// Splits `line` into rows of at most `width` columns, breaking between
/// graphemes so shell output keeps its spacing.
fn hard_wrap(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let style = line.style;
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let mut chunk = String::new();
        for grapheme in span.content.graphemes(true) {
            let w = grapheme.width();
            if used > 0 && used + w > width {
                if !chunk.is_empty() {
                    current.push(Span::styled(mem::take(&mut chunk), span.style));
                }
                rows.push(Line::from(mem::take(&mut current)).style(style));
                used = 0;
            }
            chunk.push_str(grapheme);
            used += w;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, span.style));
        }
    }
    rows.push(Line::from(current).style(style));
    rows
}

/// Colours the prompt part of `user@host:~$ cmd` lines.
fn terminal_line(text: &str, palette: &Palette) -> Line<'static> {
    match text.split_once("$ ") {
        Some((prompt, command)) if prompt.contains('@') => Line::from(vec![
            Span::styled(format!("{prompt}$ "), palette.accent()),
            Span::styled(command.to_string(), palette.code()),
        ]),
        _ => Line::styled(text.to_string(), palette.code()),
    }
}
