//! Clipboard access with a terminal fallback.
//!
//! The system clipboard (via `arboard`) is tried first. When it is
//! unavailable, e.g. over SSH or without a display server, the text is sent
//! to the terminal emulator with an OSC 52 escape sequence instead.

use crate::error::ClipboardError;
use arboard::Clipboard;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossterm::{Command, execute};
use std::fmt;
use std::io::Write;

pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Desktop clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(format!("Failed to access clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Unavailable(format!("Failed to copy: {}", e)))
    }
}

/// OSC 52 "set selection" sequence targeting the clipboard
pub struct SetTerminalClipboard<'a>(pub &'a str);

impl Command for SetTerminalClipboard<'_> {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", STANDARD.encode(self.0))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "OSC 52 requires an ANSI terminal",
        ))
    }
}

/// Terminal clipboard through OSC 52
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        execute!(self.out, SetTerminalClipboard(text))
            .map_err(|e| ClipboardError::FallbackFailed(e.to_string()))
    }
}

/// Try `primary`, silently falling back to `fallback`.
///
/// Returns the name of the backend that took the text.
pub fn copy_with_fallback(
    primary: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
    text: &str,
) -> Result<&'static str, ClipboardError> {
    match primary.set_text(text) {
        Ok(()) => Ok(primary.name()),
        Err(e) => {
            log::debug!(
                "{} clipboard failed ({}), trying {}",
                primary.name(),
                e,
                fallback.name()
            );
            fallback.set_text(text).map(|_| fallback.name())
        }
    }
}

/// Copy using the system clipboard, falling back to OSC 52 on stdout
pub fn copy_to_clipboard(text: &str) -> Result<&'static str, ClipboardError> {
    let mut primary = SystemClipboard;
    let mut fallback = Osc52Clipboard::new(std::io::stdout());
    copy_with_fallback(&mut primary, &mut fallback, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingClipboard;

    impl ClipboardBackend for FailingClipboard {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".to_string()))
        }
    }

    #[derive(Default)]
    struct MemoryClipboard(Option<String>);

    impl ClipboardBackend for MemoryClipboard {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0 = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let mut primary = MemoryClipboard::default();
        let mut fallback = MemoryClipboard::default();

        let used = copy_with_fallback(&mut primary, &mut fallback, "hello").unwrap();

        assert_eq!(used, "memory");
        assert_eq!(primary.0.as_deref(), Some("hello"));
        assert!(fallback.0.is_none());
    }

    #[test]
    fn test_falls_back_to_osc52() {
        let mut primary = FailingClipboard;
        let mut fallback = Osc52Clipboard::new(Vec::new());

        let used = copy_with_fallback(&mut primary, &mut fallback, "hello").unwrap();

        assert_eq!(used, "osc52");
        let written = String::from_utf8(fallback.into_inner()).unwrap();
        assert_eq!(written, "\x1b]52;c;aGVsbG8=\x07");
    }

    #[test]
    fn test_both_backends_failing_is_an_error() {
        let mut primary = FailingClipboard;
        let mut fallback = FailingClipboard;

        let result = copy_with_fallback(&mut primary, &mut fallback, "hello");
        assert!(result.is_err());
    }
}
