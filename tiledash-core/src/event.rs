// tiledash-core/src/event.rs
use crossbeam::channel::{Receiver, Sender, unbounded};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::drag::{DragItem, DropTarget};
use crate::model::WidgetInstance;

/// Event payload - can be any type
#[derive(Clone)]
pub struct EventPayload(Arc<dyn Any + Send + Sync>);

impl EventPayload {
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self(Arc::new(data))
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::downcast(self.0.clone()).ok()
    }
}

/// Event with topic and payload
#[derive(Clone)]
pub struct Event {
    pub topic: String,
    pub payload: EventPayload,
}

impl Event {
    pub fn new<T: Any + Send + Sync>(topic: impl Into<String>, data: T) -> Self {
        Self {
            topic: topic.into(),
            payload: EventPayload::new(data),
        }
    }
}

/// Subscription handle - dropping this unsubscribes
pub struct Subscription {
    id: usize,
    bus: Arc<EventBusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.write().remove(&self.id);
    }
}

type Subscribers = HashMap<usize, (String, Sender<Event>)>;

/// Internal bus state
struct EventBusInner {
    subscriptions: RwLock<Subscribers>,
    next_id: std::sync::atomic::AtomicUsize,
}

impl EventBusInner {
    // A panicking subscriber cannot corrupt a map of senders, so poisoning is ignored
    fn read(&self) -> RwLockReadGuard<'_, Subscribers> {
        self.subscriptions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Subscribers> {
        self.subscriptions.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Topic-based pub/sub carrying dashboard notifications to application code
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                subscriptions: RwLock::new(HashMap::new()),
                next_id: std::sync::atomic::AtomicUsize::new(0),
            }),
        }
    }

    /// Publish an event to all matching subscribers
    pub fn publish(&self, event: Event) {
        let subs = self.inner.read();

        for (pattern, tx) in subs.values() {
            if Self::topic_matches(&event.topic, pattern) {
                // Ignore send errors (subscriber dropped)
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Subscribe to topics with wildcard support
    /// Returns (Subscription, Receiver) - drop Subscription to unsubscribe
    pub fn subscribe(&self, pattern: impl Into<String>) -> (Subscription, Receiver<Event>) {
        let (tx, rx) = unbounded();
        let pattern = pattern.into();

        let id = self
            .inner
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        self.inner.write().insert(id, (pattern, tx));

        let sub = Subscription {
            id,
            bus: self.inner.clone(),
        };

        (sub, rx)
    }

    /// Check if topic matches pattern (supports * wildcard)
    fn topic_matches(topic: &str, pattern: &str) -> bool {
        if topic == pattern {
            return true;
        }

        let topic_parts: Vec<&str> = topic.split('.').collect();
        let pattern_parts: Vec<&str> = pattern.split('.').collect();

        if pattern_parts.len() > topic_parts.len() {
            return false;
        }

        for (i, pattern_part) in pattern_parts.iter().enumerate() {
            if *pattern_part == "*" {
                // Wildcard at end matches everything remaining
                if i == pattern_parts.len() - 1 {
                    return true;
                }
                continue;
            }

            if topic_parts[i] != *pattern_part {
                return false;
            }
        }

        pattern_parts.len() == topic_parts.len()
    }
}

/// Topic names published by the dashboard
pub mod topics {
    pub const LAYOUT_ADDED: &str = "layout.added";
    pub const LAYOUT_REMOVED: &str = "layout.removed";
    pub const LAYOUT_REORDERED: &str = "layout.reordered";
    pub const LAYOUT_SAVED: &str = "layout.saved";
    pub const LAYOUT_SAVE_FAILED: &str = "layout.save_failed";
    pub const LAYOUT_RELOADED: &str = "layout.reloaded";
    pub const EDIT_MODE_CHANGED: &str = "edit_mode.changed";
    pub const DRAG_START: &str = "drag.start";
    pub const DRAG_END: &str = "drag.end";
}

/// A mutation applied to the layout
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutChange {
    Added { instance: WidgetInstance, index: usize },
    Removed { instance: WidgetInstance, index: usize },
    Reordered { id: String, from: usize, to: usize },
}

impl LayoutChange {
    pub fn topic(&self) -> &'static str {
        match self {
            LayoutChange::Added { .. } => topics::LAYOUT_ADDED,
            LayoutChange::Removed { .. } => topics::LAYOUT_REMOVED,
            LayoutChange::Reordered { .. } => topics::LAYOUT_REORDERED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditModeChanged {
    pub editing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSaved {
    pub widgets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSaveFailed {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStarted {
    pub item: DragItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnded {
    pub item: DragItem,
    pub target: Option<DropTarget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_matching() {
        assert!(EventBus::topic_matches("layout.added", "layout.added"));
        assert!(EventBus::topic_matches("layout.added", "layout.*"));
        assert!(EventBus::topic_matches("layout.save_failed", "layout.*"));
        assert!(!EventBus::topic_matches("drag.start", "layout.*"));
        assert!(!EventBus::topic_matches("layout", "layout.added"));
        assert!(EventBus::topic_matches("any.thing.here", "*"));
    }

    #[test]
    fn test_pubsub() {
        let bus = EventBus::new();
        let (_sub, rx) = bus.subscribe("layout.*");

        let change = LayoutChange::Reordered {
            id: "stats-1".into(),
            from: 0,
            to: 7,
        };
        bus.publish(Event::new(change.topic(), change.clone()));

        let event = rx.recv().unwrap();
        assert_eq!(event.topic, "layout.reordered");

        let received: Arc<LayoutChange> = event.payload.downcast().unwrap();
        assert_eq!(*received, change);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let (sub, rx) = bus.subscribe("edit_mode.changed");

        bus.publish(Event::new(topics::EDIT_MODE_CHANGED, EditModeChanged { editing: true }));
        assert!(rx.recv().is_ok());

        drop(sub);

        bus.publish(Event::new(topics::EDIT_MODE_CHANGED, EditModeChanged { editing: false }));
        assert!(rx.recv().is_err()); // Channel closed
    }
}
