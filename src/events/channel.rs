//! Event channel implementation using crossbeam-channel.
//!
//! The engine is single-threaded, so the front end drains the receiver
//! between calls instead of listening on another thread.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sends events from the core library.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send an event. Never blocks: the channel is unbounded.
    ///
    /// If the receiver is dropped, the event is silently discarded.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events from the core library.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Take every event queued so far
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// Channel between the core library and a front end.
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A no-op event sender for when you don't need progress reporting.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TriageEvent;

    #[test]
    fn drain_returns_events_in_order() {
        let (sender, receiver) = EventChannel::new();

        sender.send(Event::Triage(TriageEvent::Exhausted));
        sender.send(Event::Triage(TriageEvent::SaveFailed {
            message: "disk full".to_string(),
        }));

        let events = receiver.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::Triage(TriageEvent::Exhausted)));
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Triage(TriageEvent::Exhausted));
    }
}
