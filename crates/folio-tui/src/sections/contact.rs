//! Contact section: address card and the message form.
//!
//! The form only takes keys while `editing` is set. Submitting emits
//! [`UiEffect::SubmitContact`]; the fields are cleared when the runtime
//! reports success and kept when delivery fails.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::contact::{ContactForm, Field};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::common::Palette;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Delivery status shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContactStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ContactState {
    pub form: ContactForm,
    pub editing: bool,
    pub status: ContactStatus,
}

impl ContactState {
    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Handles a key while editing.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<UiEffect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.editing = false,
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Char('s') if ctrl => return self.submit(),
            KeyCode::Enter => {
                if self.form.focus().is_multiline() {
                    self.insert('\n');
                } else {
                    self.form.focus_next();
                }
            }
            KeyCode::Backspace => {
                self.form.backspace();
                self.touch();
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert(c);
            }
            _ => {}
        }
        vec![]
    }

    /// Inserts pasted text into the focused field.
    pub fn handle_paste(&mut self, text: &str) {
        for c in text.replace("\r\n", "\n").chars() {
            self.form.insert_char(if c == '\r' { '\n' } else { c });
        }
        self.touch();
    }

    /// Records the transport outcome.
    pub fn on_sent(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.form.clear();
                self.editing = false;
                self.status = ContactStatus::Sent;
            }
            Err(err) => self.status = ContactStatus::Failed(err),
        }
    }

    fn submit(&mut self) -> Vec<UiEffect> {
        if self.status == ContactStatus::Sending {
            return vec![];
        }
        self.status = ContactStatus::Sending;
        vec![UiEffect::SubmitContact {
            message: self.form.message().clone(),
        }]
    }

    fn insert(&mut self, c: char) {
        self.form.insert_char(c);
        self.touch();
    }

    fn touch(&mut self) {
        if matches!(self.status, ContactStatus::Sent | ContactStatus::Failed(_)) {
            self.status = ContactStatus::Idle;
        }
    }
}

pub fn render(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [info, form] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);
    render_info(tui, palette, frame, info);
    render_form(&tui.contact, palette, frame, form);
}

fn render_info(tui: &TuiState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let profile = &tui.portfolio.profile;
    let mut lines = vec![
        Line::styled("Let's Work Together", palette.title()),
        Line::default(),
        Line::styled(
            "Have a project in mind or just want to say hello? Drop a message.",
            palette.base(),
        ),
        Line::default(),
        Line::from(vec![
            Span::styled("Email     ", palette.muted()),
            Span::styled(profile.email.clone(), palette.accent()),
        ]),
        Line::from(vec![
            Span::styled("Location  ", palette.muted()),
            Span::styled(profile.location.clone(), palette.base()),
        ]),
        Line::default(),
    ];
    for link in &tui.portfolio.social {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", link.label), palette.muted()),
            Span::styled(link.url.clone(), palette.accent()),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::NONE)),
        area.inner(Margin::new(1, 0)),
    );
}

fn render_form(state: &ContactState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [name, email, subject, message, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    for (field, rect) in [
        (Field::Name, name),
        (Field::Email, email),
        (Field::Subject, subject),
        (Field::Message, message),
    ] {
        render_field(state, field, palette, frame, rect);
    }

    let status_line = match &state.status {
        ContactStatus::Idle if state.editing => Line::styled(
            "Tab next field · Ctrl-S send · Esc done",
            palette.muted(),
        ),
        ContactStatus::Idle => Line::styled("Press Enter to write a message", palette.muted()),
        ContactStatus::Sending => Line::styled("Sending…", palette.accent()),
        ContactStatus::Sent => Line::styled(
            "Message sent. Thanks for reaching out!",
            Style::default().fg(palette.success),
        ),
        ContactStatus::Failed(err) => Line::styled(
            format!("Could not send: {err}"),
            Style::default().fg(palette.error),
        ),
    };
    frame.render_widget(Paragraph::new(status_line), status);
}

fn render_field(state: &ContactState, field: Field, palette: &Palette, frame: &mut Frame, area: Rect) {
    let focused = state.editing && state.form.focus() == field;
    let border = if focused { palette.accent() } else { palette.muted() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Span::styled(format!(" {} ", field.label()), border));

    let value = state.form.value(field);
    let mut text: Vec<Line> = value
        .split('\n')
        .map(|l| Line::styled(l.to_string(), palette.base()))
        .collect();
    if focused && let Some(last) = text.last_mut() {
        last.push_span(Span::styled("█", palette.accent()));
    }

    let mut paragraph = Paragraph::new(text).block(block);
    if field.is_multiline() {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut ContactState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_moves_focus_on_single_line_fields() {
        let mut state = ContactState::default();
        state.start_editing();
        type_str(&mut state, "Ada");
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.form.focus(), Field::Email);
        assert_eq!(state.form.value(Field::Name), "Ada");
    }

    #[test]
    fn test_enter_inserts_newline_in_message() {
        let mut state = ContactState::default();
        state.form.set_focus(Field::Message);
        type_str(&mut state, "hi");
        state.handle_key(key(KeyCode::Enter));
        type_str(&mut state, "there");
        assert_eq!(state.form.value(Field::Message), "hi\nthere");
    }

    #[test]
    fn test_ctrl_s_submits_once() {
        let mut state = ContactState::default();
        type_str(&mut state, "Ada");
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        let effects = state.handle_key(ctrl_s);
        assert_eq!(effects.len(), 1);
        let UiEffect::SubmitContact { message } = &effects[0] else {
            panic!("expected submit effect");
        };
        assert_eq!(message.name, "Ada");
        assert_eq!(state.status, ContactStatus::Sending);
        assert!(state.handle_key(ctrl_s).is_empty());
    }

    #[test]
    fn test_success_clears_failure_keeps() {
        let mut state = ContactState::default();
        state.start_editing();
        type_str(&mut state, "Ada");

        state.on_sent(Err("offline".into()));
        assert_eq!(state.form.value(Field::Name), "Ada");
        assert_eq!(state.status, ContactStatus::Failed("offline".into()));

        state.on_sent(Ok(()));
        assert!(state.form.is_empty());
        assert!(!state.editing);
        assert_eq!(state.status, ContactStatus::Sent);
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut state = ContactState::default();
        state.form.set_focus(Field::Message);
        state.handle_paste("a\r\nb\rc");
        assert_eq!(state.form.value(Field::Message), "a\nb\nc");
    }

    #[test]
    fn test_esc_leaves_editing() {
        let mut state = ContactState::default();
        state.start_editing();
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.editing);
    }
}
