//! Contact form state and the delivery seam.
//!
//! The form holds four free-text fields and is not validated. Submitting
//! hands a [`ContactMessage`] to whatever [`ContactTransport`] the caller
//! injects and clears the fields once the transport accepts it.

use anyhow::Result;
use tracing::info;

/// Form field, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// Whether the field accepts newlines.
    pub fn is_multiline(self) -> bool {
        matches!(self, Field::Message)
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Name,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
        }
    }
}

/// A submitted message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Delivers contact messages somewhere.
pub trait ContactTransport {
    /// # Errors
    /// Returns an error if the message could not be delivered.
    fn send(&self, message: &ContactMessage) -> Result<()>;
}

/// Transport that only records the submission in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

impl ContactTransport for LogTransport {
    fn send(&self, message: &ContactMessage) -> Result<()> {
        info!(
            name = %message.name,
            email = %message.email,
            subject = %message.subject,
            message_len = message.message.len(),
            "contact form submitted"
        );
        Ok(())
    }
}

/// Editable contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: ContactMessage,
    focus: Field,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.values.name,
            Field::Email => &self.values.email,
            Field::Subject => &self.values.subject,
            Field::Message => &self.values.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.values.name,
            Field::Email => &mut self.values.email,
            Field::Subject => &mut self.values.subject,
            Field::Message => &mut self.values.message,
        }
    }

    /// Appends a character to the focused field. Newlines are dropped for
    /// single-line fields.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focus;
        if c == '\n' && !field.is_multiline() {
            return;
        }
        self.value_mut(field).push(c);
    }

    /// Removes the last character of the focused field.
    pub fn backspace(&mut self) {
        let field = self.focus;
        self.value_mut(field).pop();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).is_empty())
    }

    /// Current field values.
    pub fn message(&self) -> &ContactMessage {
        &self.values
    }

    /// Empties every field and moves focus back to the first one.
    pub fn clear(&mut self) {
        self.values = ContactMessage::default();
        self.focus = Field::Name;
    }

    /// Sends the form through `transport` and clears it on success.
    ///
    /// # Errors
    /// Propagates the transport error; the fields are kept so nothing typed
    /// is lost.
    pub fn submit(&mut self, transport: &dyn ContactTransport) -> Result<()> {
        transport.send(&self.values)?;
        self.clear();
        Ok(())
    }
}
