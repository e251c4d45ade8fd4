//! Fact list panel
//!
//! Each fact renders as two lines:
//!
//! ```text
//! [⛔DISPUTED] Octopuses have three hearts. (example.com/octopus)
//!   science   👍 5  🤯 2  ⛔ 0
//! ```
//!
//! The panel owns only the selection; the facts themselves live in the App.
//! While a vote on a fact is in flight its counters are dimmed and further
//! votes on it are ignored.

use super::formatters::truncate_to_width;
use crate::facts::{Fact, FactId, VoteKind};
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::HashSet;
use unicode_width::UnicodeWidthStr;

pub const EMPTY_MESSAGE: &str = "No facts for this category yet. Create the first one ✌";
pub const LOADING_MESSAGE: &str = "Loading...";

/// Footer under a non-empty list
pub fn footer_text(count: usize) -> String {
    format!("There are only {} facts. Add your own!", count)
}

/// Everything the panel needs from the App for one frame
pub struct FactListView<'a> {
    pub facts: &'a [Fact],
    pub updating: &'a HashSet<FactId>,
    pub is_loading: bool,
    pub focused: bool,
    pub theme: &'a Theme,
}

#[derive(Debug, Default)]
pub struct FactList {
    state: ListState,
}

impl FactList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn select_first(&mut self, len: usize) {
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let idx = self.state.selected().unwrap_or(0);
        self.state.select(Some(idx.saturating_sub(1)));
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let idx = self.state.selected().map(|i| i + 1).unwrap_or(0);
        self.state.select(Some(idx.min(len - 1)));
    }

    /// Keep the selection valid after the list was replaced
    pub fn clamp(&mut self, len: usize) {
        match (self.state.selected(), len) {
            (_, 0) => self.state.select(None),
            (None, _) => self.state.select(Some(0)),
            (Some(i), n) if i >= n => self.state.select(Some(n - 1)),
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, view: FactListView<'_>) {
        let theme = view.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(view.focused))
            .title(" Facts ");

        if view.is_loading || view.facts.is_empty() {
            let message = if view.is_loading {
                LOADING_MESSAGE
            } else {
                EMPTY_MESSAGE
            };
            let para = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted))
                .block(block);
            f.render_widget(para, area);
            return;
        }

        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let bp = Breakpoint::from_width(area.width);
        let width = inner.width as usize;
        let items: Vec<ListItem> = view
            .facts
            .iter()
            .map(|fact| fact_item(fact, view.updating.contains(&fact.id), width, bp, theme))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.selection_bg))
            .highlight_symbol("▌");

        let mut state = self.state.clone();
        if !view.focused {
            state.select(None);
        }
        f.render_stateful_widget(list, rows[0], &mut state);
        // keep the scroll offset ratatui computed
        *self.state.offset_mut() = state.offset();

        let footer = Paragraph::new(footer_text(view.facts.len()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        f.render_widget(footer, rows[1]);
    }
}

fn fact_item(
    fact: &Fact,
    updating: bool,
    width: usize,
    bp: Breakpoint,
    theme: &Theme,
) -> ListItem<'static> {
    let mut first = Vec::new();
    let mut used = 1; // highlight symbol
    if fact.is_disputed() {
        let tag = "[⛔DISPUTED] ";
        used += tag.width();
        first.push(Span::styled(
            tag,
            Style::default()
                .fg(theme.disputed)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let source = format!(" ({})", display_source(&fact.source));
    let text_room = width.saturating_sub(used + source.width().min(width / 3));
    first.push(Span::styled(
        truncate_to_width(&fact.text, text_room),
        Style::default().fg(theme.foreground),
    ));
    first.push(Span::styled(
        truncate_to_width(&source, width.saturating_sub(used + text_room)),
        Style::default().fg(theme.source).add_modifier(Modifier::ITALIC),
    ));

    let counter_style = if updating {
        Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(theme.foreground)
    };
    let mut second = vec![
        Span::raw("  "),
        Span::styled(format!(" {} ", fact.category), theme.category_tag(fact.category())),
        Span::raw("  "),
    ];
    for kind in VoteKind::ALL {
        let label = if bp >= Breakpoint::Wide {
            format!("{} {} {}  ", vote_key(kind), kind.emoji(), fact.votes(kind))
        } else {
            format!("{} {}  ", kind.emoji(), fact.votes(kind))
        };
        second.push(Span::styled(label, counter_style));
    }
    if updating {
        second.push(Span::styled("…", Style::default().fg(theme.muted)));
    }

    ListItem::new(Text::from(vec![Line::from(first), Line::from(second)]))
}

/// Key hint shown next to each counter on wide screens
fn vote_key(kind: VoteKind) -> &'static str {
    match kind {
        VoteKind::Interesting => "[1]",
        VoteKind::Mindblowing => "[2]",
        VoteKind::False => "[3]",
    }
}

/// Source URL without its scheme, for compact display
fn display_source(source: &str) -> &str {
    source
        .strip_prefix("https://")
        .or_else(|| source.strip_prefix("http://"))
        .unwrap_or(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_moves_within_bounds() {
        let mut list = FactList::new();
        list.move_down(3);
        assert_eq!(list.selected(), Some(0));
        list.move_down(3);
        list.move_down(3);
        list.move_down(3);
        assert_eq!(list.selected(), Some(2));
        list.move_up(3);
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn clamp_follows_list_replacement() {
        let mut list = FactList::new();
        list.clamp(5);
        assert_eq!(list.selected(), Some(0));

        list.move_down(5);
        list.move_down(5);
        list.move_down(5);
        list.clamp(2);
        assert_eq!(list.selected(), Some(1));

        list.clamp(0);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn footer_counts_facts() {
        assert_eq!(footer_text(3), "There are only 3 facts. Add your own!");
    }

    #[test]
    fn source_scheme_is_hidden() {
        assert_eq!(display_source("https://example.com/a"), "example.com/a");
        assert_eq!(display_source("http://x.y"), "x.y");
    }
}
