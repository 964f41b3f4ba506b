//! Colours derived from the active theme.
//!
//! Render functions never look at the theme directly. They receive a
//! `&Palette` built once per frame from `TuiState::theme`.

use folio_core::theme::Theme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markdown::{Style as TextStyle, StyledLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub secondary: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub success: Color,
    pub error: Color,
    /// Background of code panes (playground, terminal, code blocks).
    pub code_bg: Color,
    pub code_fg: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        bg: Color::Rgb(3, 7, 18),
        fg: Color::Rgb(229, 231, 235),
        muted: Color::Rgb(156, 163, 175),
        accent: Color::Rgb(34, 211, 238),
        secondary: Color::Rgb(192, 132, 252),
        border: Color::Rgb(22, 78, 99),
        selection_bg: Color::Rgb(21, 94, 117),
        success: Color::Rgb(74, 222, 128),
        error: Color::Rgb(248, 113, 113),
        code_bg: Color::Rgb(17, 24, 39),
        code_fg: Color::Rgb(74, 222, 128),
    };

    pub const LIGHT: Palette = Palette {
        bg: Color::Rgb(255, 255, 255),
        fg: Color::Rgb(17, 24, 39),
        muted: Color::Rgb(75, 85, 99),
        accent: Color::Rgb(37, 99, 235),
        secondary: Color::Rgb(124, 58, 237),
        border: Color::Rgb(209, 213, 219),
        selection_bg: Color::Rgb(219, 234, 254),
        success: Color::Rgb(22, 163, 74),
        error: Color::Rgb(220, 38, 38),
        code_bg: Color::Rgb(249, 250, 251),
        code_fg: Color::Rgb(31, 41, 55),
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::DARK,
            Theme::Light => Self::LIGHT,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn code(&self) -> Style {
        Style::default().fg(self.code_fg).bg(self.code_bg)
    }

    /// Terminal style for a rendered markdown span.
    pub fn text_style(&self, style: TextStyle) -> Style {
        let base = Style::default();
        match style {
            TextStyle::Plain => base,
            TextStyle::Text => base.fg(self.fg),
            TextStyle::CodeInline => base.fg(self.secondary),
            TextStyle::CodeBlock => base.fg(self.code_fg).bg(self.code_bg),
            TextStyle::CodeFence | TextStyle::Rule | TextStyle::QuoteMarker => {
                base.fg(self.muted)
            }
            TextStyle::Emphasis => base.fg(self.fg).add_modifier(Modifier::ITALIC),
            TextStyle::Strong => base.fg(self.fg).add_modifier(Modifier::BOLD),
            TextStyle::H1 => base
                .fg(self.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            TextStyle::H2 => base.fg(self.accent).add_modifier(Modifier::BOLD),
            TextStyle::H3 => base.fg(self.secondary).add_modifier(Modifier::BOLD),
            TextStyle::Link => base.fg(self.accent).add_modifier(Modifier::UNDERLINED),
            TextStyle::BlockQuote => base.fg(self.muted).add_modifier(Modifier::ITALIC),
            TextStyle::ListBullet | TextStyle::ListNumber => base.fg(self.accent),
        }
    }

    /// Converts a rendered markdown line to a ratatui line.
    pub fn line(&self, line: &StyledLine) -> Line<'static> {
        line.spans
            .iter()
            .map(|s| Span::styled(s.text.clone(), self.text_style(s.style)))
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        assert_eq!(Palette::for_theme(Theme::Dark), Palette::DARK);
        assert_eq!(Palette::for_theme(Theme::Light), Palette::LIGHT);
        assert_ne!(Palette::DARK.bg, Palette::LIGHT.bg);
    }

    #[test]
    fn test_headings_are_bold() {
        let p = Palette::DARK;
        assert!(p.text_style(TextStyle::H1).add_modifier.contains(Modifier::BOLD));
        assert!(p.text_style(TextStyle::H2).add_modifier.contains(Modifier::BOLD));
        assert_eq!(p.text_style(TextStyle::Plain), Style::default());
    }
}
