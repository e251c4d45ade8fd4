// Category sidebar
//
// "All" followed by one entry per category, each drawn in its category
// color. Choosing an entry emits a CategorySelection; the App decides what
// to do with it. The cursor here is purely navigational.

use crate::facts::{Category, CategorySelection};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

#[derive(Debug, Default)]
pub struct CategoryFilter {
    cursor: usize,
}

impl CategoryFilter {
    /// "All" + every category
    pub const ENTRY_COUNT: usize = Category::ALL.len() + 1;

    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < Self::ENTRY_COUNT {
            self.cursor += 1;
        }
    }

    /// The selection under the cursor
    pub fn highlighted(&self) -> CategorySelection {
        Self::selection_at(self.cursor)
    }

    /// Entry 0 is "All", entry n is the (n-1)th category
    pub fn selection_at(index: usize) -> CategorySelection {
        match index {
            0 => CategorySelection::All,
            n => Category::ALL
                .get(n - 1)
                .copied()
                .map(CategorySelection::Category)
                .unwrap_or(CategorySelection::All),
        }
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        current: CategorySelection,
        focused: bool,
    ) {
        let items: Vec<ListItem> = (0..Self::ENTRY_COUNT)
            .map(|i| {
                let selection = Self::selection_at(i);
                let marker = if selection == current { "▸ " } else { "  " };
                let (label, style) = match selection {
                    CategorySelection::All => (
                        "All".to_string(),
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
                    CategorySelection::Category(c) => {
                        (format!(" {} ", c.name()), theme.category_tag(Some(c)))
                    }
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.highlight)),
                    Span::styled(label, style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(theme.border_style(focused))
                    .title(" Categories "),
            )
            .highlight_style(Style::default().bg(theme.selection_bg));

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.cursor));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_is_all() {
        assert_eq!(CategoryFilter::selection_at(0), CategorySelection::All);
        assert_eq!(
            CategoryFilter::selection_at(1),
            CategorySelection::Category(Category::Technology)
        );
        assert_eq!(
            CategoryFilter::selection_at(8),
            CategorySelection::Category(Category::News)
        );
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut filter = CategoryFilter::new();
        filter.move_up();
        assert_eq!(filter.cursor(), 0);
        for _ in 0..20 {
            filter.move_down();
        }
        assert_eq!(filter.cursor(), CategoryFilter::ENTRY_COUNT - 1);
        assert_eq!(
            filter.highlighted(),
            CategorySelection::Category(Category::News)
        );
    }
}
