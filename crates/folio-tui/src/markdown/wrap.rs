use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::style::{Style, StyledLine, StyledSpan};

/// Options for wrapping styled spans with hanging indents.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    /// Maximum display width for lines.
    pub width: usize,
    /// Prefix spans for the first line (e.g. "• " for a list bullet).
    pub first_prefix: Vec<StyledSpan>,
    /// Prefix spans for continuation lines.
    pub rest_prefix: Vec<StyledSpan>,
}

impl WrapOptions {
    /// Creates wrap options with just a width (no prefixes).
    pub fn new(width: usize) -> Self {
        Self {
            width,
            first_prefix: vec![],
            rest_prefix: vec![],
        }
    }

    /// Same prefix on every line.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Vec<StyledSpan>) -> Self {
        self.rest_prefix.clone_from(&prefix);
        self.first_prefix = prefix;
        self
    }
}

fn prefix_width(prefix: &[StyledSpan]) -> usize {
    prefix.iter().map(|s| s.text.width()).sum()
}

/// Accumulates words into lines no wider than the configured width.
struct LineBuilder<'a> {
    opts: &'a WrapOptions,
    lines: Vec<StyledLine>,
    current: Vec<StyledSpan>,
    used: usize,
    /// A separating space seen since the last word, with its style.
    pending_space: Option<Style>,
}

impl<'a> LineBuilder<'a> {
    fn new(opts: &'a WrapOptions) -> Self {
        Self {
            opts,
            lines: Vec::new(),
            current: Vec::new(),
            used: 0,
            pending_space: None,
        }
    }

    fn prefix(&self) -> &'a [StyledSpan] {
        if self.lines.is_empty() {
            &self.opts.first_prefix
        } else {
            &self.opts.rest_prefix
        }
    }

    /// Content width left for the line being built (at least 1).
    fn avail(&self) -> usize {
        self.opts
            .width
            .saturating_sub(prefix_width(self.prefix()))
            .max(1)
    }

    fn append(&mut self, text: &str, style: Style) {
        match self.current.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.current.push(StyledSpan::new(text, style)),
        }
        self.used += text.width();
    }

    fn break_line(&mut self) {
        let mut spans = self.prefix().to_vec();
        spans.append(&mut self.current);
        self.lines.push(StyledLine { spans });
        self.used = 0;
        self.pending_space = None;
    }

    fn space(&mut self, style: Style) {
        if self.used > 0 {
            self.pending_space = Some(style);
        }
    }

    /// Places an unbreakable token, moving it to a fresh line if needed and
    /// splitting it by grapheme only when it is wider than a whole line.
    fn word(&mut self, text: &str, style: Style) {
        let width = text.width();
        let gap = usize::from(self.pending_space.is_some() && self.used > 0);

        if self.used > 0 && self.used + gap + width > self.avail() {
            self.break_line();
        } else if gap == 1
            && let Some(space_style) = self.pending_space.take()
        {
            self.append(" ", space_style);
        }
        self.pending_space = None;

        if width <= self.avail() {
            self.append(text, style);
            return;
        }

        for grapheme in text.graphemes(true) {
            let w = grapheme.width();
            if self.used > 0 && self.used + w > self.avail() {
                self.break_line();
            }
            self.append(grapheme, style);
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        if text.starts_with(char::is_whitespace) {
            self.space(style);
        }
        let mut words = text.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.word(word, style);
            if words.peek().is_some() {
                self.space(style);
            }
        }
        if text.ends_with(char::is_whitespace) {
            self.space(style);
        }
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.break_line();
        }
        self.lines
    }
}

/// Wraps styled spans while preserving styles across line breaks.
///
/// Normal text wraps at word boundaries with whitespace collapsed. Code keeps
/// its whitespace and only breaks when it cannot fit on a line of its own.
/// `\n` inside a span forces a break.
pub fn wrap_styled_spans(spans: &[StyledSpan], opts: &WrapOptions) -> Vec<StyledLine> {
    let mut builder = LineBuilder::new(opts);

    for span in spans {
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                builder.break_line();
            }
            if part.is_empty() {
                continue;
            }
            if matches!(span.style, Style::CodeInline | Style::CodeBlock) {
                builder.word(part, span.style);
            } else {
                builder.text(part, span.style);
            }
        }
    }

    builder.finish()
}
