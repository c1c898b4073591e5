use std::cell::{Cell, RefCell};

use crate::event::{EditorEvent, EventHandler};
use crate::state::EditorState;

/// Identifies a handler registered on an [`EventBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

/// A simple event bus for broadcasting editor events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<(HandlerId, Box<dyn EventHandler>)>>,
    next_id: Cell<usize>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Emit an event to all registered handlers, in subscription order
    pub fn emit(&self, event: &EditorEvent, state: &EditorState) {
        for (_, handler) in &mut *self.handlers.borrow_mut() {
            handler.handle_event(event, state);
        }
    }

    /// Give every handler a chance to flush before the bus goes away
    pub fn shutdown(&self) {
        for (_, handler) in &mut *self.handlers.borrow_mut() {
            handler.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(Arc<AtomicUsize>);

    impl EventHandler for Counter {
        fn handle_event(&mut self, _event: &EditorEvent, _state: &EditorState) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let state = EditorState::default();

        let first = bus.subscribe(Box::new(Counter(hits.clone())));
        let second = bus.subscribe(Box::new(Counter(hits.clone())));
        assert_ne!(first, second);
        assert_eq!(bus.handler_count(), 2);

        bus.emit(&EditorEvent::WrapChanged(false), &state);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        bus.emit(&EditorEvent::WrapChanged(true), &state);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
