use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard.
///
/// Returns Ok(()) on success, or an error if clipboard is unavailable.
/// On Linux, clipboard contents are served by this process, so a clipboard
/// manager must pick them up before the process exits.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()
        .context("Failed to access system clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy text to clipboard")?;
    Ok(())
}

/// Read the current clipboard text.
///
/// A clipboard holding no text (empty, an image, files) reads as an empty
/// string.
pub fn read_from_clipboard() -> Result<String> {
    let mut clipboard = Clipboard::new()
        .context("Failed to access system clipboard")?;
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(e).context("Failed to read text from clipboard"),
    }
}
