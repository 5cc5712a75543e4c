//! Copy text to the user's clipboard.
//!
//! The system clipboard is tried first. Headless sessions (SSH, containers,
//! no display server) fall back to an OSC 52 escape sequence, which most
//! terminal emulators turn into a clipboard write on the client side.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::DashboardError;

/// Mechanism that carried the text to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// Native clipboard via the display server.
    System,
    /// OSC 52 terminal escape sequence.
    Osc52,
}

/// Copies `text` to the clipboard, logging `"{label} copied to clipboard"`.
///
/// # Errors
///
/// Returns [`DashboardError::Clipboard`] when `text` is empty or when the
/// fallback sequence cannot be written to stdout.
pub fn copy_to_clipboard(text: &str, label: &str) -> Result<CopyMethod, DashboardError> {
    if text.is_empty() {
        return Err(DashboardError::Clipboard(format!("{label} is empty")));
    }

    match copy_system(text) {
        Ok(()) => {
            tracing::info!("{label} copied to clipboard");
            return Ok(CopyMethod::System);
        }
        Err(reason) => tracing::warn!(%reason, "failed to copy text, using fallback"),
    }

    let mut stdout = std::io::stdout().lock();
    write_osc52(&mut stdout, text)
        .and_then(|()| stdout.flush())
        .map_err(|e| DashboardError::Clipboard(e.to_string()))?;
    tracing::info!("{label} copied to clipboard (fallback method)");
    Ok(CopyMethod::Osc52)
}

/// Writes the OSC 52 "set clipboard" sequence for `text`.
///
/// # Errors
///
/// Propagates I/O errors from `out`.
pub fn write_osc52<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    let encoded = STANDARD.encode(text.as_bytes());
    write!(out, "\x1b]52;c;{encoded}\x07")
}

#[cfg(feature = "clipboard")]
fn copy_system(text: &str) -> Result<(), String> {
    use copypasta::{ClipboardContext, ClipboardProvider};

    let mut ctx = ClipboardContext::new().map_err(|e| e.to_string())?;
    ctx.set_contents(text.to_string()).map_err(|e| e.to_string())
}

#[cfg(not(feature = "clipboard"))]
fn copy_system(_text: &str) -> Result<(), String> {
    Err("built without the clipboard feature".to_string())
}
