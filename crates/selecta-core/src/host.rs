//! The environment a select widget runs in.
//!
//! A [`Host`] bundles what the widget consumes from the page: the viewport
//! size, a factory for floating panel surfaces, and the document-wide event
//! bus for click and resize listeners. Listeners are explicit
//! subscribe/unsubscribe calls so their number always matches the number of
//! open widgets.

use crate::geometry::Size;
use crate::surface::{MemorySurface, Surface};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a registered global listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Kind of document-wide event a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    /// Any click in the document
    DocumentClick,
    /// Window resize
    WindowResize,
}

/// Page environment consumed by the select engine.
pub trait Host {
    /// Surface type for floating panels.
    type Panel: Surface;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Create a new, detached panel surface.
    fn create_panel(&mut self) -> Self::Panel;

    /// Register a listener. It only starts receiving events once `delay` has
    /// elapsed.
    fn subscribe(&mut self, kind: ListenerKind, delay: Duration) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);

    /// Whether the listener is registered and past its activation delay.
    fn is_armed(&self, id: ListenerId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Subscription {
    kind: ListenerKind,
    armed_at: Duration,
}

/// Deterministic host with a manual clock, for headless use and tests.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    viewport: Size,
    clock: Duration,
    next_id: u64,
    listeners: BTreeMap<ListenerId, Subscription>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 720.0))
    }
}

impl HeadlessHost {
    /// Create a host with the given viewport size.
    #[must_use]
    pub const fn new(viewport: Size) -> Self {
        Self {
            viewport,
            clock: Duration::ZERO,
            next_id: 0,
            listeners: BTreeMap::new(),
        }
    }

    /// Change the viewport size. Does not deliver a resize event.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock += elapsed;
    }

    /// Current clock value.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock
    }

    /// Number of registered listeners, armed or not.
    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Number of registered listeners of one kind.
    #[must_use]
    pub fn listeners_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|s| s.kind == kind).count()
    }
}

impl Host for HeadlessHost {
    type Panel = MemorySurface;

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn create_panel(&mut self) -> Self::Panel {
        MemorySurface::new()
    }

    fn subscribe(&mut self, kind: ListenerKind, delay: Duration) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            Subscription {
                kind,
                armed_at: self.clock + delay,
            },
        );
        tracing::trace!(?id, ?kind, ?delay, "listener subscribed");
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        if self.listeners.remove(&id).is_some() {
            tracing::trace!(?id, "listener unsubscribed");
        }
    }

    fn is_armed(&self, id: ListenerId) -> bool {
        self.listeners
            .get(&id)
            .is_some_and(|s| s.armed_at <= self.clock)
    }
}
