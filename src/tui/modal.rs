// Modal overlays
//
// A modal captures all input while open. The App holds `Option<Modal>` and
// acts on the `ModalAction` returned from input handling.

use crossterm::event::KeyCode;

/// Message shown when a list query fails
pub const LOAD_ERROR_MESSAGE: &str = "There was a problem getting data";

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, nothing else to do
    None,
    /// Close the modal
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Blocking message that must be acknowledged
    Alert(String),
    /// Recent log entries
    Logs,
}

impl Modal {
    pub fn alert(message: impl Into<String>) -> Self {
        Modal::Alert(message.into())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Modal::Help => " Help ",
            Modal::Alert(_) => " Alert ",
            Modal::Logs => " Logs ",
        }
    }

    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Alert(_) => match key {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Logs => match key {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}
