//! Typed publish/subscribe
//!
//! `EventBus<T>` fans an event out synchronously to every subscriber that is
//! registered at dispatch time. There is no queueing and no replay: a
//! subscriber added after an `emit` never sees that event.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`EventBus::subscribe`], used to unsubscribe
    pub struct Subscription;
}

/// Subscriber callback type
pub type Handler<T> = Box<dyn FnMut(&T) + Send>;

/// Synchronous fan-out event bus
pub struct EventBus<T> {
    handlers: SlotMap<Subscription, Handler<T>>,
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
        }
    }

    /// Register a subscriber
    pub fn subscribe<F>(&mut self, handler: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.handlers.insert(Box::new(handler))
    }

    /// Remove a subscriber. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.handlers.remove(subscription).is_some()
    }

    /// Deliver `event` to every current subscriber, returning how many ran
    pub fn emit(&mut self, event: &T) -> usize {
        let mut delivered = 0;
        for handler in self.handlers.values_mut() {
            handler(event);
            delivered += 1;
        }
        tracing::trace!(delivered, "bus emit");
        delivered
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fan_out_to_all_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["a", "b"] {
            let seen = seen.clone();
            bus.subscribe(move |n: &u32| seen.lock().unwrap().push((tag, *n)));
        }

        assert_eq!(bus.emit(&7), 2);
        let mut got = seen.lock().unwrap().clone();
        got.sort();
        assert_eq!(got, vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_late_subscriber_gets_no_replay() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();
        bus.emit(&1u8);

        let count_clone = count.clone();
        bus.subscribe(move |_: &u8| *count_clone.lock().unwrap() += 1);
        assert_eq!(*count.lock().unwrap(), 0);

        bus.emit(&2);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus: EventBus<()> = EventBus::new();
        let sub = bus.subscribe(|_| {});
        assert_eq!(bus.len(), 1);

        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        assert_eq!(bus.emit(&()), 0);
    }
}
