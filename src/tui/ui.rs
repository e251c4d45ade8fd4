// UI rendering
//
// One draw function per frame: shell (title, status), then the form, the
// category sidebar and the fact list, then overlays (modal, toast).

use super::app::{App, Focus};
use super::components::{status_bar, title_bar, FactListView};
use super::layout::{self, centered};
use super::modal::Modal;
use crate::config::VERSION;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::Level;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let regions = layout::split(f.area(), app.show_form);
    app.set_sidebar_visible(regions.sidebar.is_some());

    title_bar::render(f, regions.title, app);

    if let Some(area) = regions.form {
        app.form
            .render(f, area, &app.theme, app.focus == Focus::Form);
    }

    if let Some(area) = regions.sidebar {
        app.category_filter.render(
            f,
            area,
            &app.theme,
            app.current_category,
            app.focus == Focus::Categories,
        );
    }

    let view = FactListView {
        facts: &app.facts,
        updating: &app.updating,
        is_loading: app.is_loading,
        focused: app.focus == Focus::Facts,
        theme: &app.theme,
    };
    app.fact_list.render(f, regions.facts, view);

    status_bar::render(f, regions.status, app);

    // Overlays on top of everything
    if let Some(ref modal) = app.modal {
        render_modal(f, modal, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

fn render_modal(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Alert(message) => render_alert(f, app, message),
        Modal::Logs => render_logs(f, app),
    }
}

/// Fixed-size rect centered in `area`, clipped to it
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn modal_block<'a>(app: &App, title: &'a str, hint: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .border_type(app.theme.border_type)
        .title(title)
        .title_bottom(Line::from(hint).centered())
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Facts", header_style)),
        kb("↑/↓, j/k", "Move selection"),
        kb("1, i", "Vote interesting 👍"),
        kb("2, m", "Vote mind-blowing 🤯"),
        kb("3, f", "Vote false ⛔"),
        kb("y", "Copy source URL"),
        Line::raw(""),
        Line::from(Span::styled("  Categories", header_style)),
        kb("Enter", "Filter by highlighted"),
        Line::raw(""),
        Line::from(Span::styled("  Share a fact", header_style)),
        kb("n", "Open / close the form"),
        kb("Tab", "Next field"),
        kb("←/→", "Pick category"),
        kb("Enter", "Post"),
        kb("Esc", "Close form"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("Tab", "Cycle panel focus"),
        kb("r", "Reload list"),
        kb("L", "Recent logs"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled(
            format!("  til v{}", VERSION),
            Style::default().fg(app.theme.muted),
        )),
    ]);

    let area = centered_fixed(44, 30, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(modal_block(app, Modal::Help.title(), " Press ? or Esc to close "));
    f.render_widget(paragraph, area);
}

fn render_alert(f: &mut Frame, app: &App, message: &str) {
    let area = centered_fixed(48, 7, f.area());
    f.render_widget(Clear, area);

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(app.theme.disputed)
                .add_modifier(Modifier::BOLD),
        )),
    ]);

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(app.theme.background))
        .block(modal_block(app, " Alert ", " Enter to dismiss "));
    f.render_widget(paragraph, area);
}

fn render_logs(f: &mut Frame, app: &App) {
    let area = centered(f.area(), 80, 70);
    f.render_widget(Clear, area);

    let rows = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .log_buffer
        .recent(rows)
        .iter()
        .map(|entry| {
            let color = if entry.level == Level::ERROR {
                app.theme.disputed
            } else if entry.level == Level::WARN {
                app.theme.title
            } else if entry.level == Level::INFO {
                app.theme.foreground
            } else {
                app.theme.muted
            };
            Line::from(Span::styled(entry.display_line(), Style::default().fg(color)))
        })
        .collect();

    let title = format!(" Logs ({}) ", app.log_buffer.len());
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.background))
        .block(modal_block(app, &title, " L or Esc to close "));
    f.render_widget(paragraph, area);
}
