// Status bar component
//
// Current filter, fact count, pending writes and the key hints, on one line.

use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let pending = app.updating.len() + usize::from(app.form.uploading);
    let pending_info = if pending > 0 {
        format!(" │ ⇡ {}", pending)
    } else {
        String::new()
    };

    let hints = match (app.focus, bp) {
        (_, Breakpoint::Narrow) => "? help",
        (Focus::Form, _) => "Tab field │ ←/→ category │ Enter post │ Esc close",
        (Focus::Categories, _) => "Enter filter │ Tab facts │ n share │ ? help │ q quit",
        (Focus::Facts, _) => "1/2/3 vote │ y copy source │ Tab categories │ n share │ ? help",
    };

    let text = format!(
        " {} │ {} facts{} │ {}",
        app.current_category,
        app.facts.len(),
        pending_info,
        hints
    );

    let status = Paragraph::new(text).style(Style::default().fg(app.theme.status_bar));
    f.render_widget(status, area);
}
