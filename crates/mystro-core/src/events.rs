//! Document-wide click bus.
//!
//! The host forwards every pointer click to [`ClickBus::dispatch`].
//! Components subscribe for as long as they need to observe clicks; the
//! returned [`Subscription`] detaches the listener when dropped.

use kurbo::Point;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A pointer click somewhere in the document, in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub position: Point,
}

impl ClickEvent {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

type Listener = Rc<dyn Fn(&ClickEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Shared click event bus. Clones refer to the same bus.
#[derive(Clone, Default)]
pub struct ClickBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ClickBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. It stays attached until the subscription is dropped.
    pub fn subscribe(&self, listener: impl Fn(&ClickEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        log::trace!("Click listener {} attached ({} total)", id, inner.listeners.len());

        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver a click to every attached listener.
    pub fn dispatch(&self, event: &ClickEvent) {
        // Snapshot so listeners may subscribe or unsubscribe while handling.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl std::fmt::Debug for ClickBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle that keeps a listener attached to a [`ClickBus`].
#[must_use = "dropping a subscription detaches the listener"]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    /// Whether the listener is still attached to a live bus.
    pub fn is_attached(&self) -> bool {
        self.bus
            .upgrade()
            .is_some_and(|bus| bus.borrow().listeners.iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        // The listener is dropped after the borrow ends; it may own subscriptions itself.
        let removed = {
            let mut inner = bus.borrow_mut();
            let index = inner.listeners.iter().position(|(id, _)| *id == self.id);
            let removed = index.map(|index| inner.listeners.remove(index));
            log::trace!("Click listener {} detached ({} left)", self.id, inner.listeners.len());
            removed
        };
        drop(removed);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_listener() {
        let bus = ClickBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let _sub = bus.subscribe(move |_| counter.set(counter.get() + 1));

        bus.dispatch(&ClickEvent::new(Point::new(1.0, 2.0)));
        bus.dispatch(&ClickEvent::new(Point::new(3.0, 4.0)));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let bus = ClickBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = bus.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(bus.listener_count(), 1);
        assert!(sub.is_attached());

        drop(sub);
        assert_eq!(bus.listener_count(), 0);
        bus.dispatch(&ClickEvent::new(Point::ZERO));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_only_own_listener_removed() {
        let bus = ClickBus::new();
        let first = bus.subscribe(|_| {});
        let second = bus.subscribe(|_| {});
        drop(first);
        assert_eq!(bus.listener_count(), 1);
        assert!(second.is_attached());
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = ClickBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        assert!(!sub.is_attached());
        drop(sub);
    }

    #[test]
    fn test_listener_can_subscribe_during_dispatch() {
        let bus = ClickBus::new();
        let spawned: Rc<RefCell<Vec<Subscription>>> = Rc::default();
        let inner_bus = bus.clone();
        let store = spawned.clone();
        let _sub = bus.subscribe(move |_| {
            store.borrow_mut().push(inner_bus.subscribe(|_| {}));
        });

        bus.dispatch(&ClickEvent::new(Point::ZERO));
        assert_eq!(bus.listener_count(), 2);
    }
}
