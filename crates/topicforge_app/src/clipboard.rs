use std::time::Duration;

use engine_logging::{engine_info, engine_warn};

/// How long the CLI keeps serving a copy before it exits anyway. On X11 and
/// Wayland the owning process serves the clipboard, so the contents only
/// outlive the process once a clipboard manager or a paste has taken them.
pub const DEFAULT_HANDOFF_WINDOW: Duration = Duration::from_secs(30);

/// Destination for the markdown copy. Reports success as a plain flag.
pub trait ClipboardWriter: Send {
    fn write_text(&mut self, text: &str) -> bool;
}

/// The desktop clipboard. Opened per copy so a missing display server only
/// fails the copy, not startup.
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    handoff_window: Duration,
}

impl SystemClipboard {
    pub fn new(handoff_window: Duration) -> Self {
        Self { handoff_window }
    }

    #[cfg(target_os = "linux")]
    fn set_text(&self, text: &str) -> Result<(), arboard::Error> {
        use arboard::SetExtLinux;

        let mut clipboard = arboard::Clipboard::new()?;
        if self.handoff_window.is_zero() {
            return clipboard.set_text(text);
        }
        engine_info!(
            "Holding the clipboard for up to {}s until another owner takes it",
            self.handoff_window.as_secs()
        );
        let deadline = std::time::Instant::now() + self.handoff_window;
        clipboard.set().wait_until(deadline).text(text)
    }

    #[cfg(not(target_os = "linux"))]
    fn set_text(&self, text: &str) -> Result<(), arboard::Error> {
        arboard::Clipboard::new()?.set_text(text)
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new(DEFAULT_HANDOFF_WINDOW)
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> bool {
        match self.set_text(text) {
            Ok(()) => {
                engine_info!("Copied {} bytes to the clipboard", text.len());
                true
            }
            Err(err) => {
                engine_warn!("Clipboard write failed: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clipboard_holds_the_copy_before_exit() {
        let clipboard = SystemClipboard::default();
        assert_eq!(clipboard.handoff_window, DEFAULT_HANDOFF_WINDOW);
        assert!(!clipboard.handoff_window.is_zero());
    }
}
