// Title bar component
//
// App title on the left, the form toggle hint on the right, and a spinner
// while a list query is in flight.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const APP_TITLE: &str = "Today I learned!";

/// Label of the form toggle; mirrors whether the form is open
pub fn toggle_label(show_form: bool) -> &'static str {
    if show_form {
        "Close"
    } else {
        "Share a Fact"
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let loading = if app.is_loading {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };
    let title_text = format!(" 💡 {}{}", APP_TITLE, loading);
    let toggle = format!(" [n] {} ", toggle_label(app.show_form));

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(toggle).right_aligned()),
        );

    f.render_widget(title, area);
}
