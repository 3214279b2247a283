//! Clipboard abstraction layer.
//!
//! Trait-based so the commands can be exercised without a real clipboard.
//! Push needs to distinguish "clipboard is empty" from "clipboard is
//! unavailable", so both operations are result-typed.

use anyhow::{Context, Result};

/// Trait for clipboard operations.
pub trait ClipboardProvider {
    /// Get text from the clipboard.
    fn get_text(&mut self) -> Result<String>;

    /// Set text to the clipboard.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard implementation using arboard.
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        let mut cb = arboard::Clipboard::new().context("clipboard unavailable")?;
        match cb.get_text() {
            Ok(text) => Ok(text),
            // An empty clipboard reports as a content error on some
            // platforms; treat it as empty text and let the caller decide.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(e).context("failed to read clipboard"),
        }
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut cb = arboard::Clipboard::new().context("clipboard unavailable")?;
        cb.set_text(text.to_string())
            .context("failed to write clipboard")
    }
}

/// In-memory clipboard for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryClipboard {
    pub text: String,
}

#[cfg(test)]
impl ClipboardProvider for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        Ok(())
    }
}
