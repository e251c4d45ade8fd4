// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, completed store calls)
// - Layered key dispatch

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::events::StoreEvent;
use crate::facts::VoteKind;
use crate::logging::LogBuffer;
use crate::store::FactStore;
use anyhow::{Context, Result};
use app::{App, Focus};
use components::FormAction;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Capacity of the store event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Run the TUI
///
/// Sets up the terminal, loads the initial list, runs the event loop and
/// restores the terminal when done.
pub async fn run_tui(
    store: Arc<dyn FactStore>,
    config: Config,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (events_tx, mut events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let mut app = App::with_config(store, events_tx, &config, log_buffer);
    app.load_facts();

    let result = run_event_loop(&mut terminal, &mut app, &mut events_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, the redraw tick and completed store calls,
/// handling whichever arrives first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events_rx: &mut mpsc::Receiver<StoreEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for spinners and toast expiry
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Completed store calls
            Some(store_event) = events_rx.recv() => {
                app.apply(store_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Form → Global → Focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        app.should_quit = true;
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    if handle_form_input(app, key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    match app.focus {
        Focus::Categories => handle_category_keys(app, &key_event),
        Focus::Facts => handle_fact_keys(app, &key_event),
        Focus::Form => {}
    }
}

/// Modal captures all input while open
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
    }

    true
}

/// The open, focused form takes every key; Esc hands focus back
fn handle_form_input(app: &mut App, key_event: KeyEvent) -> bool {
    if !app.show_form || app.focus != Focus::Form {
        return false;
    }

    match app.form.handle_key(key_event) {
        FormAction::Submit => app.submit_form(),
        FormAction::Close => app.toggle_form(),
        FormAction::None => {}
    }
    true
}

/// Global keys work the same regardless of focus
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('n') => app.toggle_form(),
        KeyCode::Char('?') => app.modal = Some(Modal::Help),
        KeyCode::Char('L') => app.modal = Some(Modal::Logs),
        KeyCode::Char('r') => app.load_facts(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        _ => return false,
    }
    true
}

fn handle_category_keys(app: &mut App, key_event: &KeyEvent) {
    if key_event.code == KeyCode::Enter {
        app.choose_highlighted_category();
    }
}

fn handle_fact_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.code {
        KeyCode::Char('1') | KeyCode::Char('i') => app.vote_selected(VoteKind::Interesting),
        KeyCode::Char('2') | KeyCode::Char('m') => app.vote_selected(VoteKind::Mindblowing),
        KeyCode::Char('3') | KeyCode::Char('f') => app.vote_selected(VoteKind::False),
        KeyCode::Char('y') => {
            if let Some(source) = app.selected_fact().map(|f| f.source.clone()) {
                if clipboard::copy_to_clipboard(&source).is_ok() {
                    app.show_toast("✓ Source copied to clipboard");
                } else {
                    app.show_toast("✗ Failed to copy");
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::sample_fact;
    use crate::store::MemoryFactStore;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(rows: Vec<crate::facts::Fact>) -> (App, mpsc::Receiver<StoreEvent>) {
        let (tx, rx) = mpsc::channel(8);
        let app = App::with_config(
            Arc::new(MemoryFactStore::with_facts(rows)),
            tx,
            &Config::default(),
            LogBuffer::new(),
        );
        (app, rx)
    }

    #[tokio::test]
    async fn typing_q_in_form_does_not_quit() {
        let (mut app, _rx) = app_with(vec![]);
        handle_key_event(&mut app, press(KeyCode::Char('n')));
        assert!(app.show_form);

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.form.text, "q");
    }

    #[tokio::test]
    async fn esc_in_form_closes_it() {
        let (mut app, _rx) = app_with(vec![]);
        handle_key_event(&mut app, press(KeyCode::Char('n')));
        handle_key_event(&mut app, press(KeyCode::Esc));
        assert!(!app.show_form);
        assert_eq!(app.focus, Focus::Facts);
    }

    #[tokio::test]
    async fn alert_swallows_keys_until_acknowledged() {
        let (mut app, _rx) = app_with(vec![]);
        app.modal = Some(Modal::alert(modal::LOAD_ERROR_MESSAGE));

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert!(app.modal.is_some());

        handle_key_event(&mut app, press(KeyCode::Enter));
        assert!(app.modal.is_none());
    }

    #[tokio::test]
    async fn sidebar_enter_applies_highlighted_category() {
        let (mut app, mut rx) = app_with(vec![sample_fact(1, "a", "technology")]);
        handle_key_event(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Categories);

        handle_key_event(&mut app, press(KeyCode::Down));
        handle_key_event(&mut app, press(KeyCode::Enter));
        assert_eq!(
            app.current_category,
            components::CategoryFilter::selection_at(1)
        );
        assert!(app.is_loading);

        let event = rx.recv().await.expect("select result");
        app.apply(event);
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn vote_key_targets_selected_fact() {
        let (mut app, mut rx) = app_with(vec![sample_fact(1, "a", "news")]);
        app.load_facts();
        let loaded = rx.recv().await.expect("select result");
        app.apply(loaded);

        handle_key_event(&mut app, press(KeyCode::Char('2')));
        let updated = rx.recv().await.expect("update result");
        app.apply(updated);

        assert_eq!(app.facts[0].votes_mindblowing, 1);
    }
}
