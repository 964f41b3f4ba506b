use comfy_table::{ContentArrangement, Table};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

use super::style::{Style, StyledLine, StyledSpan};
use super::wrap::{WrapOptions, wrap_styled_spans};

/// Renders markdown text into styled lines wrapped at `width`.
pub fn render_markdown(text: &str, width: usize) -> Vec<StyledLine> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = MarkdownRenderer::new(width);
    for event in Parser::new_ext(text, options) {
        renderer.process_event(event);
    }
    renderer.finish()
}

/// Cells collected while inside a table, rendered with comfy-table at the end.
#[derive(Debug, Default)]
struct TableBuffer {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl TableBuffer {
    fn end_cell(&mut self) {
        let cell = std::mem::take(&mut self.cell);
        self.row.push(cell.trim().to_string());
    }

    fn end_row(&mut self, is_header: bool) {
        let row = std::mem::take(&mut self.row);
        if is_header {
            self.header = row;
        } else {
            self.rows.push(row);
        }
    }

    fn render(&self, width: usize) -> Vec<String> {
        let mut table = Table::new();
        table.set_width(u16::try_from(width).unwrap_or(u16::MAX));
        table.set_content_arrangement(ContentArrangement::Dynamic);
        if !self.header.is_empty() {
            table.set_header(&self.header);
        }
        for row in &self.rows {
            table.add_row(row);
        }
        table.to_string().lines().map(String::from).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct ListLevel {
    /// Next number for ordered lists, `None` for bullets.
    next: Option<u64>,
}

struct MarkdownRenderer {
    width: usize,
    lines: Vec<StyledLine>,
    /// Inline spans of the block being collected.
    spans: Vec<StyledSpan>,
    styles: Vec<Style>,
    lists: Vec<ListLevel>,
    quote_depth: usize,
    code: Option<Option<String>>,
    link_url: Option<String>,
    table: Option<TableBuffer>,
    in_table_head: bool,
}

impl MarkdownRenderer {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: vec![Style::Text],
            lists: Vec::new(),
            quote_depth: 0,
            code: None,
            link_url: None,
            table: None,
            in_table_head: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(Style::Text)
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn quote_prefix(&self) -> Vec<StyledSpan> {
        if self.quote_depth == 0 {
            Vec::new()
        } else {
            vec![StyledSpan::new("│ ".repeat(self.quote_depth), Style::QuoteMarker)]
        }
    }

    /// Blank separator line, skipped inside lists and at the very top.
    fn blank(&mut self) {
        if self.lists.is_empty() && self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(StyledLine::empty());
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.add_inline_code(&code),
            Event::SoftBreak => self.add_text(" "),
            Event::HardBreak => self.add_text("\n"),
            Event::Rule => {
                self.flush_block();
                self.lines.push(StyledLine {
                    spans: vec![StyledSpan::new("─".repeat(self.width.min(40)), Style::Rule)],
                });
                self.blank();
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.spans.push(StyledSpan::new(marker, Style::ListBullet));
            }
            // Raw HTML is dropped so posts cannot inject escape sequences.
            Event::Html(_)
            | Event::InlineHtml(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_block();
                self.styles.push(match level {
                    HeadingLevel::H1 => Style::H1,
                    HeadingLevel::H2 => Style::H2,
                    _ => Style::H3,
                });
            }
            Tag::CodeBlock(kind) => {
                self.flush_block();
                self.code = Some(match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                });
            }
            Tag::List(start) => {
                self.flush_block();
                self.lists.push(ListLevel { next: start });
            }
            Tag::Item | Tag::Paragraph => self.flush_block(),
            Tag::BlockQuote(_) => {
                self.flush_block();
                self.quote_depth += 1;
                self.styles.push(Style::BlockQuote);
            }
            Tag::Emphasis => self.styles.push(Style::Emphasis),
            Tag::Strong => self.styles.push(Style::Strong),
            Tag::Strikethrough | Tag::Superscript | Tag::Subscript => {
                let inherited = self.style();
                self.styles.push(inherited);
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.styles.push(Style::Link);
            }
            Tag::Table(_) => {
                self.flush_block();
                self.table = Some(TableBuffer::default());
            }
            Tag::TableHead => self.in_table_head = true,
            Tag::Image { .. }
            | Tag::TableRow
            | Tag::TableCell
            | Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::HtmlBlock
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_block();
                self.blank();
            }
            TagEnd::Heading(_) => {
                self.flush_block();
                self.pop_style();
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.flush_code_block();
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush_block();
                self.lists.pop();
                self.blank();
            }
            TagEnd::Item => {
                self.flush_block();
                if let Some(ListLevel { next: Some(n) }) = self.lists.last_mut() {
                    *n += 1;
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_block();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pop_style();
                self.blank();
            }
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    let shown: String = self.spans.iter().map(|s| s.text.as_str()).collect();
                    if !url.is_empty() && !shown.ends_with(url.as_str()) {
                        self.spans.push(StyledSpan::new(format!(" ({url})"), Style::CodeFence));
                    }
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript => self.pop_style(),
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    for line in table.render(self.width) {
                        self.lines.push(StyledLine {
                            spans: vec![StyledSpan::new(line, Style::Plain)],
                        });
                    }
                }
                self.blank();
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row(true);
                }
                self.in_table_head = false;
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut()
                    && !self.in_table_head
                {
                    table.end_row(false);
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.end_cell();
                }
            }
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&text.replace('\n', " "));
            return;
        }
        let style = if self.code.is_some() {
            Style::CodeBlock
        } else {
            self.style()
        };
        self.spans.push(StyledSpan::new(text, style));
    }

    fn add_inline_code(&mut self, code: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(code);
            return;
        }
        self.spans.push(StyledSpan::new(code, Style::CodeInline));
    }

    /// Wraps the pending inline spans as a paragraph, list item or quote line.
    fn flush_block(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let quote = self.quote_prefix();

        let opts = match self.lists.last().copied() {
            Some(level) => {
                let depth = self.lists.len() - 1;
                let (marker, marker_style) = match level.next {
                    Some(n) => (format!("{n}. "), Style::ListNumber),
                    None => ("• ".to_string(), Style::ListBullet),
                };
                let indent = "  ".repeat(depth);
                let hang = " ".repeat(marker.width());

                let mut first = quote.clone();
                first.push(StyledSpan::new(indent.clone(), Style::Plain));
                first.push(StyledSpan::new(marker, marker_style));
                let mut rest = quote;
                rest.push(StyledSpan::new(format!("{indent}{hang}"), Style::Plain));

                WrapOptions {
                    width: self.width,
                    first_prefix: first,
                    rest_prefix: rest,
                }
            }
            None => WrapOptions::new(self.width).with_prefix(quote),
        };

        self.lines.extend(wrap_styled_spans(&spans, &opts));
    }

    /// Code blocks are fenced and indented, never wrapped.
    fn flush_code_block(&mut self) {
        let lang = self.code.take().flatten();
        let body: String = std::mem::take(&mut self.spans)
            .into_iter()
            .map(|s| s.text)
            .collect();

        let fence = lang.map_or_else(|| "```".to_string(), |l| format!("```{l}"));
        self.lines.push(StyledLine {
            spans: vec![StyledSpan::new(fence, Style::CodeFence)],
        });
        for line in body.trim_end_matches('\n').split('\n') {
            self.lines.push(StyledLine {
                spans: vec![
                    StyledSpan::new("  ", Style::Plain),
                    StyledSpan::new(line, Style::CodeBlock),
                ],
            });
        }
        self.lines.push(StyledLine {
            spans: vec![StyledSpan::new("```", Style::CodeFence)],
        });
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if self.code.is_some() {
            self.flush_code_block();
        } else {
            self.flush_block();
        }
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(StyledLine::empty());
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_style(lines: &[StyledLine], style: Style) -> bool {
        lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == style))
    }

    fn texts(lines: &[StyledLine]) -> Vec<String> {
        lines.iter().map(StyledLine::plain_text).collect()
    }

    #[test]
    fn test_heading_styles() {
        let lines = render_markdown("# H1\n\n## H2\n\n### H3", 80);
        assert!(has_style(&lines, Style::H1));
        assert!(has_style(&lines, Style::H2));
        assert!(has_style(&lines, Style::H3));
        assert_eq!(texts(&lines), vec!["H1", "", "H2", "", "H3"]);
    }

    #[test]
    fn test_bold_italic_and_inline_code() {
        let lines = render_markdown("**bold** and *italic* with `code`", 80);
        assert!(has_style(&lines, Style::Strong));
        assert!(has_style(&lines, Style::Emphasis));
        assert!(has_style(&lines, Style::CodeInline));
        assert_eq!(texts(&lines), vec!["bold and italic with code"]);
    }

    #[test]
    fn test_paragraph_wraps() {
        let lines = render_markdown("one two three four five", 10);
        assert_eq!(texts(&lines), vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_code_block_is_fenced_and_unwrapped() {
        let md = "```rust\nfn main() {\n    println!(\"a very long line that would wrap\");\n}\n```";
        let lines = render_markdown(md, 20);
        let text = texts(&lines);
        assert_eq!(text[0], "```rust");
        assert_eq!(text[2], "      println!(\"a very long line that would wrap\");");
        assert_eq!(text.last().map(String::as_str), Some("```"));
        assert!(has_style(&lines, Style::CodeBlock));
    }

    #[test]
    fn test_lists() {
        let lines = render_markdown("- item 1\n- item 2\n\n1. first\n2. second", 80);
        assert_eq!(
            texts(&lines),
            vec!["• item 1", "• item 2", "", "1. first", "2. second"]
        );
        assert!(has_style(&lines, Style::ListBullet));
        assert!(has_style(&lines, Style::ListNumber));
    }

    #[test]
    fn test_list_item_with_strong_lead() {
        let lines = render_markdown("- **Robust backend:** Django ORM.", 80);
        assert_eq!(texts(&lines), vec!["• Robust backend: Django ORM."]);
    }

    #[test]
    fn test_blockquote_gutter() {
        let lines = render_markdown("> **Pro Tip:** keep it loose", 80);
        assert_eq!(texts(&lines), vec!["│ Pro Tip: keep it loose"]);
        assert!(has_style(&lines, Style::QuoteMarker));
        assert!(has_style(&lines, Style::Strong));
    }

    #[test]
    fn test_link_shows_url() {
        let lines = render_markdown("[site](https://example.com)", 80);
        assert_eq!(texts(&lines), vec!["site (https://example.com)"]);
        assert!(has_style(&lines, Style::Link));
    }

    #[test]
    fn test_html_is_dropped() {
        let lines = render_markdown("before <b>x</b> after\n\n<div>block</div>", 80);
        let all = texts(&lines).join("\n");
        assert!(!all.contains("<b>"));
        assert!(!all.contains("<div>"));
    }

    #[test]
    fn test_table_renders() {
        let lines = render_markdown("| A | B |\n|---|---|\n| 1 | 2 |", 80);
        assert!(lines.len() >= 3);
        let all = texts(&lines).join("\n");
        for needle in ["A", "B", "1", "2"] {
            assert!(all.contains(needle), "missing {needle} in {all}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown("", 80), vec![StyledLine::empty()]);
    }
}
