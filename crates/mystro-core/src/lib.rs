//! MySTRO Share Core Library
//!
//! Platform-agnostic state and logic for the library share widget: share
//! targets, the dropdown state machine, copy feedback timing, the document
//! click bus and the clipboard capability.

pub mod clipboard;
pub mod deferred;
pub mod diagnostics;
pub mod events;
pub mod panel;
pub mod share;
pub mod targets;

pub use clipboard::{Clipboard, ClipboardError, ClipboardResult, MemoryClipboard, PendingWrite, WriteCompleter};
pub use deferred::{Clock, DeferredTask, ManualClock, SystemClock};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, RecordingSink};
pub use events::{ClickBus, ClickEvent, Subscription};
pub use panel::PanelState;
pub use share::{COPY_FEEDBACK_DURATION, ShareWidget};
pub use targets::{DEFAULT_LIBRARY_NAME, ShareError, ShareProps, ShareResult, ShareTargets};
