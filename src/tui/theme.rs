// Color themes for the TUI
//
// Two built-in themes, picked by name from the config. Category tags use the
// registry's own colors on top of either theme.

use crate::facts::Category;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Colors for every UI element
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub focused_border: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub disputed: Color,
    pub source: Color,
    pub status_bar: Color,
    pub border_type: BorderType,
}

impl Theme {
    /// Look up a theme by name; unknown names get the dark theme
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(41, 37, 36),
            foreground: Color::Rgb(250, 250, 249),
            muted: Color::Rgb(168, 162, 158),
            title: Color::Rgb(250, 204, 21),
            border: Color::Rgb(87, 83, 78),
            focused_border: Color::Rgb(96, 165, 250),
            highlight: Color::Rgb(96, 165, 250),
            selection_bg: Color::Rgb(68, 64, 60),
            disputed: Color::Rgb(239, 68, 68),
            source: Color::Rgb(168, 162, 158),
            status_bar: Color::Rgb(214, 211, 209),
            border_type: BorderType::Rounded,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 249),
            foreground: Color::Rgb(28, 25, 23),
            muted: Color::Rgb(120, 113, 108),
            title: Color::Rgb(202, 138, 4),
            border: Color::Rgb(214, 211, 209),
            focused_border: Color::Rgb(37, 99, 235),
            highlight: Color::Rgb(37, 99, 235),
            selection_bg: Color::Rgb(231, 229, 228),
            disputed: Color::Rgb(220, 38, 38),
            source: Color::Rgb(120, 113, 108),
            status_bar: Color::Rgb(68, 64, 60),
            border_type: BorderType::Plain,
        }
    }

    /// Border style for a panel, brighter when it has focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Tag style for a category name; unknown names get a neutral tag
    pub fn category_tag(&self, category: Option<Category>) -> Style {
        let bg = match category {
            Some(c) => {
                let (r, g, b) = c.rgb();
                Color::Rgb(r, g, b)
            }
            None => self.muted,
        };
        Style::default()
            .fg(Color::Rgb(255, 255, 255))
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
