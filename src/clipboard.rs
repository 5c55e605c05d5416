//! System clipboard access through `arboard`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Set the system clipboard to `text`.
pub fn set(text: &str) -> Result<(), ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.set_text(text.to_owned())?;
    Ok(())
}

/// Copy `text`, logging instead of failing when no clipboard is reachable
/// (for example over SSH). Returns whether the copy happened.
pub fn copy_or_warn(text: &str) -> bool {
    match set(text) {
        Ok(()) => {
            tracing::info!(chars = text.chars().count(), "copied to clipboard");
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "clipboard unavailable");
            false
        }
    }
}
