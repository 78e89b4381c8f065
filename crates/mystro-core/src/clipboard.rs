//! Clipboard capability.
//!
//! Writing to a system clipboard may complete later (browser promise) or
//! right away (native). Either way the caller gets a [`PendingWrite`] it can
//! poll; the platform side resolves it through a [`WriteCompleter`].

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Clipboard failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard permission denied: {0}")]
    PermissionDenied(String),
}

/// Result type for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

type Slot = Rc<RefCell<Option<ClipboardResult<()>>>>;

/// Receiving end of a clipboard write.
#[derive(Debug)]
pub struct PendingWrite {
    slot: Slot,
}

impl PendingWrite {
    /// Create an unresolved write and the handle that resolves it.
    pub fn channel() -> (PendingWrite, WriteCompleter) {
        let slot: Slot = Rc::default();
        (
            PendingWrite { slot: slot.clone() },
            WriteCompleter { slot: Some(slot) },
        )
    }

    /// A write that already finished.
    pub fn resolved(result: ClipboardResult<()>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(result))),
        }
    }

    /// Take the outcome if the write has finished.
    pub fn take_result(&self) -> Option<ClipboardResult<()>> {
        self.slot.borrow_mut().take()
    }
}

/// Sending end of a clipboard write.
///
/// Dropping it without calling [`WriteCompleter::complete`] resolves the
/// write as [`ClipboardError::Unavailable`].
#[derive(Debug)]
pub struct WriteCompleter {
    slot: Option<Slot>,
}

impl WriteCompleter {
    /// Deliver the outcome of the write.
    pub fn complete(mut self, result: ClipboardResult<()>) {
        if let Some(slot) = self.slot.take() {
            *slot.borrow_mut() = Some(result);
        }
    }
}

impl Drop for WriteCompleter {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            *slot.borrow_mut() = Some(Err(ClipboardError::Unavailable(
                "clipboard write abandoned".to_string(),
            )));
        }
    }
}

/// A place text can be copied to.
pub trait Clipboard {
    /// Start writing `text`. The outcome is reported through the returned handle.
    fn write_text(&mut self, text: &str) -> PendingWrite;
}

/// In-memory clipboard for testing and headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failure: Option<ClipboardError>,
    writes: usize,
}

impl MemoryClipboard {
    /// Create an empty clipboard that accepts writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard whose writes always fail with `error`.
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Last successfully written text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of write attempts.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> PendingWrite {
        self.writes += 1;
        match &self.failure {
            Some(error) => PendingWrite::resolved(Err(error.clone())),
            None => {
                self.contents = Some(text.to_string());
                PendingWrite::resolved(Ok(()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_resolves_once() {
        let (pending, completer) = PendingWrite::channel();
        assert_eq!(pending.take_result(), None);

        completer.complete(Ok(()));
        assert_eq!(pending.take_result(), Some(Ok(())));
        assert_eq!(pending.take_result(), None);
    }

    #[test]
    fn test_dropped_completer_reports_unavailable() {
        let (pending, completer) = PendingWrite::channel();
        drop(completer);
        assert!(matches!(
            pending.take_result(),
            Some(Err(ClipboardError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_memory_clipboard_stores_text() {
        let mut clipboard = MemoryClipboard::new();
        let pending = clipboard.write_text("https://mystro.example/library/clara");
        assert_eq!(pending.take_result(), Some(Ok(())));
        assert_eq!(clipboard.contents(), Some("https://mystro.example/library/clara"));
        assert_eq!(clipboard.writes(), 1);
    }

    #[test]
    fn test_failing_clipboard_keeps_contents() {
        let error = ClipboardError::PermissionDenied("blocked".to_string());
        let mut clipboard = MemoryClipboard::failing(error.clone());
        let pending = clipboard.write_text("text");
        assert_eq!(pending.take_result(), Some(Err(error)));
        assert_eq!(clipboard.contents(), None);
    }
}
