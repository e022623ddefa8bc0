//! Clipboard module
//!
//! System clipboard access behind a small trait so the controller can be
//! driven without a display server.

use crate::shared::error::{AppError, AppResult};

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> AppResult<()>;
}

/// Clipboard of the current desktop session.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> AppResult<()> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        let mut ctx = ClipboardContext::new()
            .map_err(|e| AppError::Clipboard(format!("Failed to open clipboard: {}", e)))?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to clipboard: {}", e)))
    }
}
