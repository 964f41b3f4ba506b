/// A styled span of text (UI-agnostic).
///
/// Converted to ratatui spans at render time, so the same output feeds both
/// the TUI and the plain-text `folio blog` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// Creates an empty line.
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    /// Concatenated text without styling.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Semantic style identifiers.
///
/// Translated to terminal styles through the active palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No styling.
    Plain,
    /// Body text.
    Text,
    /// Inline code (`code`).
    CodeInline,
    /// Fenced code block content.
    CodeBlock,
    /// Code fence markers, rendered subtly.
    CodeFence,
    /// Emphasized text (*italic*).
    Emphasis,
    /// Strong text (**bold**).
    Strong,
    /// Heading level 1 (# Heading).
    H1,
    /// Heading level 2 (## Heading).
    H2,
    /// Heading level 3+ (`### Heading`).
    H3,
    Link,
    BlockQuote,
    /// Gutter drawn in front of quoted lines.
    QuoteMarker,
    ListBullet,
    ListNumber,
    /// Horizontal rule.
    Rule,
}
