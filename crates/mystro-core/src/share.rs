//! Share widget controller.
//!
//! Holds the view state of the share button (panel visibility and copy
//! feedback) independently of any GUI toolkit. The renderer reads the state,
//! reports the on-screen region of the widget, and forwards user intents.

use crate::clipboard::{Clipboard, PendingWrite};
use crate::deferred::{Clock, DeferredTask, SystemClock};
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::events::{ClickBus, ClickEvent, Subscription};
use crate::panel::PanelState;
use crate::targets::{ShareProps, ShareResult, ShareTargets, normalize_origin};
use kurbo::Rect;
use std::cell::Cell;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
#[cfg(target_arch = "wasm32")]
use web_time::Duration;

/// How long the "Copied!" confirmation stays visible.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// State shared with the outside-click listener.
#[derive(Debug, Default)]
struct SharedState {
    panel: Cell<PanelState>,
    root: Cell<Option<Rect>>,
}

impl SharedState {
    fn handle_click(&self, event: &ClickEvent) {
        if !self.panel.get().is_open() {
            return;
        }
        let inside = self
            .root
            .get()
            .is_some_and(|root| root.contains(event.position));
        if !inside {
            log::debug!("Click outside share widget at {:?}, closing panel", event.position);
            self.panel.set(self.panel.get().dismissed());
        }
    }
}

/// The share button with its dropdown of share targets.
pub struct ShareWidget<C: Clock = SystemClock> {
    origin: String,
    props: ShareProps,
    targets: ShareTargets,
    shared: Rc<SharedState>,
    copied: bool,
    reset: DeferredTask,
    pending: Vec<PendingWrite>,
    subscription: Option<Subscription>,
    clock: C,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl ShareWidget<SystemClock> {
    /// Create a widget using the wall clock and logging diagnostics.
    pub fn new(origin: &str, props: ShareProps) -> ShareResult<Self> {
        Self::with_parts(origin, props, SystemClock, Box::new(LogSink))
    }
}

impl<C: Clock> ShareWidget<C> {
    /// Create a widget with an explicit clock and diagnostic sink.
    pub fn with_parts(
        origin: &str,
        props: ShareProps,
        clock: C,
        diagnostics: Box<dyn DiagnosticSink>,
    ) -> ShareResult<Self> {
        let origin = normalize_origin(origin)?;
        let targets = ShareTargets::new(&origin, &props)?;
        Ok(Self {
            origin,
            props,
            targets,
            shared: Rc::default(),
            copied: false,
            reset: DeferredTask::new(),
            pending: Vec::new(),
            subscription: None,
            clock,
            diagnostics,
        })
    }

    /// Current inputs.
    pub fn props(&self) -> &ShareProps {
        &self.props
    }

    /// Replace the inputs and rebuild the share targets.
    pub fn set_props(&mut self, props: ShareProps) -> ShareResult<()> {
        self.targets = ShareTargets::new(&self.origin, &props)?;
        self.props = props;
        Ok(())
    }

    /// Links offered by the panel.
    pub fn targets(&self) -> &ShareTargets {
        &self.targets
    }

    /// Start observing document clicks on `bus`. Replaces any earlier subscription.
    pub fn mount(&mut self, bus: &ClickBus) {
        let shared = self.shared.clone();
        self.subscription = Some(bus.subscribe(move |event| shared.handle_click(event)));
        log::debug!("Share widget for '{}' mounted", self.props.username);
    }

    /// Stop observing document clicks. Copy feedback and in-flight writes
    /// are discarded along with the reset task.
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            log::debug!("Share widget for '{}' unmounted", self.props.username);
        }
        self.reset.cancel();
        self.copied = false;
        self.pending.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Region covered by the widget on screen (trigger plus open panel).
    pub fn set_root_region(&mut self, region: Rect) {
        self.shared.root.set(Some(region));
    }

    pub fn root_region(&self) -> Option<Rect> {
        self.shared.root.get()
    }

    pub fn panel_state(&self) -> PanelState {
        self.shared.panel.get()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_state().is_open()
    }

    /// Trigger button clicked.
    pub fn toggle_dropdown(&mut self) {
        let next = self.panel_state().toggled();
        log::debug!("Share panel {:?}", next);
        self.shared.panel.set(next);
    }

    pub fn close_dropdown(&mut self) {
        self.shared.panel.set(self.panel_state().dismissed());
    }

    /// Whether the "Copied!" confirmation is showing.
    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Copy the share URL. Feedback appears once the write succeeds.
    pub fn copy_link(&mut self, clipboard: &mut dyn Clipboard) {
        let pending = clipboard.write_text(&self.targets.share_url);
        self.pending.push(pending);
        self.poll_pending();
    }

    /// Advance in-flight writes and the feedback reset. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_pending();
        if self.reset.poll(self.clock.now()) {
            self.copied = false;
        }
    }

    /// Time until the confirmation disappears.
    pub fn copy_feedback_remaining(&self) -> Option<Duration> {
        self.reset.remaining(self.clock.now())
    }

    /// Whether the host should keep ticking (feedback showing or writes in flight).
    pub fn needs_tick(&self) -> bool {
        self.reset.is_pending() || !self.pending.is_empty()
    }

    fn poll_pending(&mut self) {
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for pending in self.pending.drain(..) {
            match pending.take_result() {
                None => still_pending.push(pending),
                Some(Ok(())) => {
                    log::info!("Copied share link {}", self.targets.share_url);
                    self.copied = true;
                    self.reset.schedule(self.clock.now(), COPY_FEEDBACK_DURATION);
                }
                Some(Err(error)) => {
                    self.diagnostics.report(Diagnostic::CopyFailed(error));
                }
            }
        }
        self.pending = still_pending;
    }
}

impl<C: Clock> Drop for ShareWidget<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardError, MemoryClipboard, WriteCompleter};
    use crate::deferred::ManualClock;
    use crate::diagnostics::RecordingSink;
    use kurbo::Point;

    const ORIGIN: &str = "https://mystro.example";

    fn widget() -> (ShareWidget<ManualClock>, ManualClock, RecordingSink) {
        let clock = ManualClock::new();
        let sink = RecordingSink::new();
        let widget = ShareWidget::with_parts(
            ORIGIN,
            ShareProps::new("clara"),
            clock.clone(),
            Box::new(sink.clone()),
        )
        .unwrap();
        (widget, clock, sink)
    }

    fn click(bus: &ClickBus, x: f64, y: f64) {
        bus.dispatch(&ClickEvent::new(Point::new(x, y)));
    }

    /// Clipboard that hands out completers instead of resolving writes.
    #[derive(Default)]
    struct DeferredClipboard {
        completers: Vec<WriteCompleter>,
    }

    impl Clipboard for DeferredClipboard {
        fn write_text(&mut self, _text: &str) -> PendingWrite {
            let (pending, completer) = PendingWrite::channel();
            self.completers.push(completer);
            pending
        }
    }

    #[test]
    fn test_initial_state() {
        let (widget, _, _) = widget();
        assert_eq!(widget.panel_state(), PanelState::Closed);
        assert!(!widget.is_copied());
        assert!(!widget.is_mounted());
        assert!(!widget.needs_tick());
        assert_eq!(widget.targets().share_url, "https://mystro.example/library/clara");
    }

    #[test]
    fn test_trigger_toggles_panel() {
        let (mut widget, _, _) = widget();
        widget.toggle_dropdown();
        assert_eq!(widget.panel_state(), PanelState::Open);
        widget.toggle_dropdown();
        assert_eq!(widget.panel_state(), PanelState::Closed);
    }

    #[test]
    fn test_outside_click_closes_panel() {
        let bus = ClickBus::new();
        let (mut widget, _, _) = widget();
        widget.mount(&bus);
        widget.set_root_region(Rect::new(100.0, 10.0, 300.0, 200.0));
        widget.toggle_dropdown();

        click(&bus, 20.0, 20.0);
        assert_eq!(widget.panel_state(), PanelState::Closed);
    }

    #[test]
    fn test_inside_click_keeps_panel_open() {
        let bus = ClickBus::new();
        let (mut widget, _, _) = widget();
        widget.mount(&bus);
        widget.set_root_region(Rect::new(100.0, 10.0, 300.0, 200.0));
        widget.toggle_dropdown();

        click(&bus, 150.0, 120.0);
        assert_eq!(widget.panel_state(), PanelState::Open);
    }

    #[test]
    fn test_outside_click_ignored_while_closed() {
        let bus = ClickBus::new();
        let (mut widget, _, _) = widget();
        widget.mount(&bus);
        widget.set_root_region(Rect::new(100.0, 10.0, 300.0, 200.0));

        click(&bus, 5.0, 5.0);
        assert_eq!(widget.panel_state(), PanelState::Closed);
        widget.toggle_dropdown();
        assert_eq!(widget.panel_state(), PanelState::Open);
    }

    #[test]
    fn test_unmounted_widget_ignores_clicks() {
        let bus = ClickBus::new();
        let (mut widget, _, _) = widget();
        widget.toggle_dropdown();

        click(&bus, 5.0, 5.0);
        assert_eq!(widget.panel_state(), PanelState::Open);
    }

    #[test]
    fn test_copy_success_sets_and_resets_flag() {
        let (mut widget, clock, sink) = widget();
        let mut clipboard = MemoryClipboard::new();

        widget.copy_link(&mut clipboard);
        assert!(widget.is_copied());
        assert_eq!(clipboard.contents(), Some("https://mystro.example/library/clara"));

        clock.advance(Duration::from_millis(1999));
        widget.tick();
        assert!(widget.is_copied());

        clock.advance(Duration::from_millis(1));
        widget.tick();
        assert!(!widget.is_copied());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_second_copy_restarts_window() {
        let (mut widget, clock, _) = widget();
        let mut clipboard = MemoryClipboard::new();

        widget.copy_link(&mut clipboard);
        clock.advance(Duration::from_millis(1500));
        widget.copy_link(&mut clipboard);

        clock.advance(Duration::from_millis(1500));
        widget.tick();
        assert!(widget.is_copied());

        clock.advance(Duration::from_millis(500));
        widget.tick();
        assert!(!widget.is_copied());
        assert_eq!(clipboard.writes(), 2);
    }

    #[test]
    fn test_copy_failure_reports_once() {
        let (mut widget, clock, sink) = widget();
        let error = ClipboardError::PermissionDenied("denied by user agent".to_string());
        let mut clipboard = MemoryClipboard::failing(error.clone());

        widget.copy_link(&mut clipboard);
        assert!(!widget.is_copied());

        clock.advance(Duration::from_secs(3));
        widget.tick();
        widget.tick();
        assert!(!widget.is_copied());
        assert_eq!(sink.records(), vec![Diagnostic::CopyFailed(error)]);
    }

    #[test]
    fn test_copy_failure_keeps_existing_feedback() {
        let (mut widget, _, sink) = widget();
        widget.copy_link(&mut MemoryClipboard::new());
        widget.copy_link(&mut MemoryClipboard::failing(ClipboardError::Unavailable(
            "no clipboard".to_string(),
        )));
        assert!(widget.is_copied());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_async_copy_resolves_on_tick() {
        let (mut widget, clock, _) = widget();
        let mut clipboard = DeferredClipboard::default();

        widget.copy_link(&mut clipboard);
        assert!(!widget.is_copied());
        assert!(widget.needs_tick());

        clock.advance(Duration::from_millis(300));
        clipboard.completers.pop().unwrap().complete(Ok(()));
        widget.tick();
        assert!(widget.is_copied());
        assert_eq!(widget.copy_feedback_remaining(), Some(COPY_FEEDBACK_DURATION));
    }

    #[test]
    fn test_abandoned_async_copy_is_reported() {
        let (mut widget, _, sink) = widget();
        let mut clipboard = DeferredClipboard::default();

        widget.copy_link(&mut clipboard);
        clipboard.completers.clear();
        widget.tick();
        assert!(!widget.is_copied());
        assert_eq!(sink.len(), 1);
        assert!(!widget.needs_tick());
    }

    #[test]
    fn test_unmount_restores_listener_count() {
        let bus = ClickBus::new();
        let baseline = bus.listener_count();
        let (mut widget, _, _) = widget();

        widget.mount(&bus);
        widget.toggle_dropdown();
        assert_eq!(bus.listener_count(), baseline + 1);

        widget.unmount();
        assert_eq!(bus.listener_count(), baseline);
        click(&bus, 0.0, 0.0);
        assert!(widget.is_panel_open());
    }

    #[test]
    fn test_unmount_clears_copy_feedback() {
        let bus = ClickBus::new();
        let (mut widget, clock, sink) = widget();
        let mut clipboard = MemoryClipboard::new();
        widget.mount(&bus);
        widget.copy_link(&mut clipboard);
        assert!(widget.is_copied());

        widget.unmount();
        assert!(!widget.is_copied());
        assert!(!widget.needs_tick());

        widget.mount(&bus);
        clock.advance(Duration::from_secs(60));
        widget.tick();
        assert!(!widget.is_copied());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unmount_discards_in_flight_write() {
        let bus = ClickBus::new();
        let (mut widget, _, sink) = widget();
        let mut clipboard = DeferredClipboard::default();
        widget.mount(&bus);
        widget.copy_link(&mut clipboard);
        assert!(widget.needs_tick());

        widget.unmount();
        widget.mount(&bus);
        clipboard.completers.pop().unwrap().complete(Ok(()));
        widget.tick();
        assert!(!widget.is_copied());
        assert!(!widget.needs_tick());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_remount_keeps_single_listener() {
        let bus = ClickBus::new();
        let (mut widget, _, _) = widget();
        widget.mount(&bus);
        widget.mount(&bus);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let bus = ClickBus::new();
        let (mut widget, _, _) = widget();
        widget.mount(&bus);
        widget.toggle_dropdown();
        drop(widget);

        assert_eq!(bus.listener_count(), 0);
        click(&bus, 0.0, 0.0);
    }

    #[test]
    fn test_write_completing_after_drop_is_harmless() {
        let (mut widget, _, sink) = widget();
        let mut clipboard = DeferredClipboard::default();
        widget.copy_link(&mut clipboard);
        drop(widget);

        clipboard.completers.pop().unwrap().complete(Ok(()));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_set_props_rebuilds_targets() {
        let (mut widget, _, _) = widget();
        widget
            .set_props(ShareProps::new("glenn").with_library_name("Goldberg Corner"))
            .unwrap();
        assert_eq!(widget.targets().share_url, "https://mystro.example/library/glenn");
        assert_eq!(
            widget.targets().share_message,
            "Check out my Goldberg Corner on MySTRO!"
        );

        assert!(widget.set_props(ShareProps::new("")).is_err());
        assert_eq!(widget.props().username, "glenn");
    }
}
