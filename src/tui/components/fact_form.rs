//! Submission form for new facts
//!
//! Holds the three inputs (text, source, category) and the uploading flag.
//! The form only edits and validates; posting goes through the App, which
//! owns the store and the fact list.

use super::formatters::tail_to_width;
use crate::facts::{validate_new_fact, Category, NewFact, ValidationError, MAX_TEXT_CHARS};
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Placeholder label shown while no category is chosen
const CHOOSE_CATEGORY: &str = "Choose Category";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Text,
    Source,
    Category,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Text => FormField::Source,
            FormField::Source => FormField::Category,
            FormField::Category => FormField::Text,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Text => FormField::Category,
            FormField::Source => FormField::Text,
            FormField::Category => FormField::Source,
        }
    }
}

/// What the App should do after the form handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Close,
}

#[derive(Debug, Default)]
pub struct FactForm {
    pub text: String,
    pub source: String,
    /// Selected category label (upper-case), empty when none chosen
    pub category: String,
    /// Insert in flight; all input is ignored until it completes
    pub uploading: bool,
    pub field: FormField,
}

impl FactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters left before the text limit
    pub fn remaining_chars(&self) -> usize {
        MAX_TEXT_CHARS.saturating_sub(self.text.chars().count())
    }

    /// Type a character into the focused input
    pub fn input_char(&mut self, c: char) {
        match self.field {
            FormField::Text => {
                if self.remaining_chars() > 0 {
                    self.text.push(c);
                }
            }
            FormField::Source => self.source.push(c),
            FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Text => {
                self.text.pop();
            }
            FormField::Source => {
                self.source.pop();
            }
            FormField::Category => self.category.clear(),
        }
    }

    /// Step through the selector: none, then each category in registry order
    pub fn cycle_category(&mut self, forward: bool) {
        let current = Category::from_name(&self.category)
            .and_then(|c| Category::ALL.iter().position(|&x| x == c));
        let slots = Category::ALL.len() + 1; // + "Choose Category"
        let slot = current.map(|i| i + 1).unwrap_or(0);
        let next = if forward {
            (slot + 1) % slots
        } else {
            (slot + slots - 1) % slots
        };
        self.category = match next {
            0 => String::new(),
            n => Category::ALL[n - 1].label(),
        };
    }

    /// Validate the inputs and build the record to insert
    pub fn validate(&self) -> Result<NewFact, ValidationError> {
        validate_new_fact(&self.text, &self.source, &self.category)
    }

    /// Empty all inputs and return focus to the text field
    pub fn clear(&mut self) {
        self.text.clear();
        self.source.clear();
        self.category.clear();
        self.field = FormField::Text;
    }

    /// Route a key press to the form
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.uploading {
            return FormAction::None;
        }

        match key.code {
            KeyCode::Esc => FormAction::Close,
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Tab => {
                self.field = self.field.next();
                FormAction::None
            }
            KeyCode::BackTab => {
                self.field = self.field.prev();
                FormAction::None
            }
            KeyCode::Up => {
                self.field = self.field.prev();
                FormAction::None
            }
            KeyCode::Down => {
                self.field = self.field.next();
                FormAction::None
            }
            KeyCode::Left if self.field == FormField::Category => {
                self.cycle_category(false);
                FormAction::None
            }
            KeyCode::Right | KeyCode::Char(' ') if self.field == FormField::Category => {
                self.cycle_category(true);
                FormAction::None
            }
            KeyCode::Backspace => {
                self.backspace();
                FormAction::None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input_char(c);
                FormAction::None
            }
            _ => FormAction::None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let title = if self.uploading {
            " Share a fact · posting… "
        } else {
            " Share a fact "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(focused))
            .title(title);

        let inner_width = area.width.saturating_sub(2) as usize;
        let lines = vec![
            self.input_line(
                FormField::Text,
                "Fact",
                &self.text,
                "Share a fact with the world...",
                Some(self.remaining_chars()),
                inner_width,
                theme,
                focused,
            ),
            self.input_line(
                FormField::Source,
                "Source",
                &self.source,
                "Trustworthy source...",
                None,
                inner_width,
                theme,
                focused,
            ),
            self.category_line(theme, focused),
        ];

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn label_style(&self, field: FormField, theme: &Theme, focused: bool) -> Style {
        if focused && self.field == field && !self.uploading {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn input_line<'a>(
        &self,
        field: FormField,
        label: &'a str,
        value: &'a str,
        placeholder: &'a str,
        remaining: Option<usize>,
        width: usize,
        theme: &Theme,
        focused: bool,
    ) -> Line<'a> {
        let suffix = remaining.map(|n| format!(" {}", n)).unwrap_or_default();
        let prefix = format!("{:>8} ", label);
        let cursor = if focused && self.field == field && !self.uploading {
            "▏"
        } else {
            ""
        };
        let room = width.saturating_sub(prefix.width() + suffix.width() + cursor.width());

        let value_span = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(theme.muted))
        } else {
            Span::styled(
                tail_to_width(value, room),
                Style::default().fg(theme.foreground),
            )
        };

        Line::from(vec![
            Span::styled(prefix, self.label_style(field, theme, focused)),
            value_span,
            Span::styled(cursor, Style::default().fg(theme.highlight)),
            Span::styled(suffix, Style::default().fg(theme.muted)),
        ])
    }

    fn category_line(&self, theme: &Theme, focused: bool) -> Line<'static> {
        let shown = if self.category.is_empty() {
            CHOOSE_CATEGORY.to_string()
        } else {
            self.category.clone()
        };
        let tag_style = if self.category.is_empty() {
            Style::default().fg(theme.muted)
        } else {
            theme.category_tag(Category::from_name(&self.category))
        };

        Line::from(vec![
            Span::styled(
                format!("{:>8} ", "Category"),
                self.label_style(FormField::Category, theme, focused),
            ),
            Span::styled("◂ ", Style::default().fg(theme.muted)),
            Span::styled(format!(" {} ", shown), tag_style),
            Span::styled(" ▸", Style::default().fg(theme.muted)),
            Span::styled(
                "    [Enter] Post  [Esc] Close",
                Style::default().fg(theme.muted),
            ),
        ])
    }
}
