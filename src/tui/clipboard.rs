//! Copy a fact's source URL to the system clipboard
//!
//! `arboard` talks to the platform clipboard; a fresh handle is opened per
//! copy so nothing is held between uses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Put `text` on the clipboard.
///
/// Fails on headless Linux (no display server) or when access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    Clipboard::new()
        .context("Failed to access clipboard")?
        .set_text(text)
        .context("Failed to set clipboard text")
}
