//! Markdown rendering for blog posts.
//!
//! - `render_markdown()`: parse markdown text into styled, wrapped lines
//! - `wrap_styled_spans()`: wrap styled spans while preserving styles across line breaks
//!
//! Uses pulldown-cmark for parsing. Raw HTML is dropped.

mod parse;
mod style;
mod wrap;

pub use parse::render_markdown;
pub use style::{Style, StyledLine, StyledSpan};
pub use wrap::{WrapOptions, wrap_styled_spans};

/// Renders markdown to plain text lines (styles dropped).
pub fn render_plain(text: &str, width: usize) -> Vec<String> {
    render_markdown(text, width)
        .iter()
        .map(StyledLine::plain_text)
        .collect()
}
