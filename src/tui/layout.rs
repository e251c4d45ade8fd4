//! Width breakpoints and screen regions.
//!
//! One place for the column thresholds so render code does not scatter them.
use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: no sidebar, compact vote counters
    Narrow,
    /// 60-99 cols
    Normal,
    /// 100+ cols: vote labels spelled out
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Narrow,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Sidebar width in columns; zero hides it
    pub fn sidebar_width(&self) -> u16 {
        match self {
            Breakpoint::Narrow => 0,
            Breakpoint::Normal => 20,
            Breakpoint::Wide => 22,
        }
    }
}

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub title: Rect,
    pub form: Option<Rect>,
    pub sidebar: Option<Rect>,
    pub facts: Rect,
    pub status: Rect,
}

/// Height of the submission form including borders
pub const FORM_HEIGHT: u16 = 5;

/// Split the screen: title, optional form, sidebar + fact list, status line
pub fn split(area: Rect, show_form: bool) -> Regions {
    let form_height = if show_form { FORM_HEIGHT } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let sidebar_width = Breakpoint::from_width(area.width).sidebar_width();
    let (sidebar, facts) = if sidebar_width == 0 {
        (None, rows[2])
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(10)])
            .split(rows[2]);
        (Some(cols[0]), cols[1])
    };

    Regions {
        title: rows[0],
        form: show_form.then_some(rows[1]),
        sidebar,
        facts,
        status: rows[3],
    }
}

/// A rectangle centered in `area`, sized as a percentage of it
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
