//! Observer events for ring state changes.
//!
//! Callers subscribe callbacks instead of implementing a delegate with
//! optional methods; "not interested" is simply "not subscribed". Value
//! updates fire once per frame while animating and must stay cheap on
//! the subscriber side.

use std::time::Duration;

/// A state change worth telling subscribers about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingEvent {
    /// The displayed value moved (per-frame while animating)
    ValueChanged(f32),
    /// A value transition reached its target
    Finished,
    /// A transition or timer was paused
    Paused,
    /// A paused transition or timer resumed
    Continued,
    /// The timer emitted a tick
    TimerTick {
        elapsed: Duration,
        remaining: Duration,
    },
    /// The timer reached its total duration
    TimerDone,
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of event subscribers owned by one ring widget.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&RingEvent)>)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every future event.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&RingEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber in subscription order.
    pub fn emit(&mut self, event: &RingEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_emit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut observers = Observers::new();
        observers.subscribe(move |event| sink.borrow_mut().push(*event));

        observers.emit(&RingEvent::ValueChanged(10.0));
        observers.emit(&RingEvent::Finished);

        assert_eq!(
            *seen.borrow(),
            vec![RingEvent::ValueChanged(10.0), RingEvent::Finished]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();

        let mut observers = Observers::new();
        let id = observers.subscribe(move |_| *sink.borrow_mut() += 1);

        observers.emit(&RingEvent::Finished);
        assert!(observers.unsubscribe(id));
        observers.emit(&RingEvent::Finished);

        assert_eq!(*count.borrow(), 1);
        assert!(!observers.unsubscribe(id));
    }

    #[test]
    fn test_multiple_subscribers_all_notified() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        for _ in 0..3 {
            let sink = count.clone();
            observers.subscribe(move |_| *sink.borrow_mut() += 1);
        }

        observers.emit(&RingEvent::Paused);
        assert_eq!(*count.borrow(), 3);
    }
}
