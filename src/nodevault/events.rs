//! # Mutation Events
//!
//! Every successful add, update and delete emits a [`VaultEvent`] on the
//! [`EventBus`] owned by the API. Observers are registered when the API is
//! built and are strictly fire-and-forget: an observer that returns an error
//! or panics is logged and skipped, and never turns a completed mutation
//! into an error.
//!
//! Two observers ship with the crate:
//! - [`LogObserver`]: writes each event to the `nodevault::events` tracing
//!   target (the vault's audit log).
//! - [`ChannelObserver`]: pushes events into a bounded queue for a consumer
//!   elsewhere. When the queue is full the event is dropped.
//!
//! Plain closures `Fn(&VaultEvent)` are observers too.

use crate::model::RecordId;
use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Added,
    Updated,
    Deleted,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Added => "added",
            EventKind::Updated => "updated",
            EventKind::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEvent {
    pub kind: EventKind,
    pub id: RecordId,
    pub at: DateTime<Utc>,
}

impl VaultEvent {
    pub fn new(kind: EventKind, id: RecordId) -> Self {
        Self {
            kind,
            id,
            at: Utc::now(),
        }
    }
}

/// Error reported by an observer. Only ever logged.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ObserverError(pub String);

pub trait EventObserver {
    fn notify(&self, event: &VaultEvent) -> std::result::Result<(), ObserverError>;
}

impl<F> EventObserver for F
where
    F: Fn(&VaultEvent),
{
    fn notify(&self, event: &VaultEvent) -> std::result::Result<(), ObserverError> {
        self(event);
        Ok(())
    }
}

/// The set of observers notified on every mutation.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn EventObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: impl EventObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn emit(&self, kind: EventKind, id: RecordId) {
        let event = VaultEvent::new(kind, id);
        for observer in &self.observers {
            match panic::catch_unwind(AssertUnwindSafe(|| observer.notify(&event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(kind = %event.kind, id = event.id, error = %e, "event observer failed")
                }
                Err(_) => warn!(kind = %event.kind, id = event.id, "event observer panicked"),
            }
        }
    }
}

/// Writes events to the `nodevault::events` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl EventObserver for LogObserver {
    fn notify(&self, event: &VaultEvent) -> std::result::Result<(), ObserverError> {
        info!(
            target: "nodevault::events",
            kind = %event.kind,
            id = event.id,
            at = %event.at.to_rfc3339(),
            "record {}",
            event.kind
        );
        Ok(())
    }
}

/// Feeds events into a bounded queue.
pub struct ChannelObserver {
    sender: SyncSender<VaultEvent>,
}

impl ChannelObserver {
    /// Creates the observer together with the receiving end of its queue.
    pub fn bounded(capacity: usize) -> (Self, Receiver<VaultEvent>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender }, receiver)
    }
}

impl EventObserver for ChannelObserver {
    fn notify(&self, event: &VaultEvent) -> std::result::Result<(), ObserverError> {
        match self.sender.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ObserverError("event queue full".into())),
            Err(TrySendError::Disconnected(_)) => {
                Err(ObserverError("event queue disconnected".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingObserver;

    impl EventObserver for FailingObserver {
        fn notify(&self, _event: &VaultEvent) -> std::result::Result<(), ObserverError> {
            Err(ObserverError("boom".into()))
        }
    }

    #[test]
    fn closures_receive_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let bus = EventBus::new().with_observer(move |e: &VaultEvent| {
            sink.borrow_mut().push((e.kind, e.id));
        });

        bus.emit(EventKind::Added, 1);
        bus.emit(EventKind::Deleted, 1);

        assert_eq!(
            *seen.borrow(),
            vec![(EventKind::Added, 1), (EventKind::Deleted, 1)]
        );
    }

    #[test]
    fn failing_observer_does_not_stop_the_others() {
        let (channel, rx) = ChannelObserver::bounded(4);
        let bus = EventBus::new()
            .with_observer(FailingObserver)
            .with_observer(channel);

        bus.emit(EventKind::Updated, 7);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, EventKind::Updated);
        assert_eq!(event.id, 7);
    }

    #[test]
    fn full_queue_drops_events() {
        let (channel, rx) = ChannelObserver::bounded(1);
        let bus = EventBus::new().with_observer(channel);

        bus.emit(EventKind::Added, 1);
        bus.emit(EventKind::Added, 2);

        assert_eq!(rx.try_recv().unwrap().id, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_swallowed() {
        let (channel, rx) = ChannelObserver::bounded(1);
        drop(rx);
        let (after, rx_after) = ChannelObserver::bounded(1);
        let bus = EventBus::new()
            .with_observer(channel)
            .with_observer(LogObserver)
            .with_observer(after);

        bus.emit(EventKind::Deleted, 3);

        assert_eq!(rx_after.try_recv().unwrap().id, 3);
    }

    #[test]
    fn panicking_observer_is_contained() {
        let (channel, rx) = ChannelObserver::bounded(1);
        let bus = EventBus::new()
            .with_observer(|_: &VaultEvent| panic!("observer bug"))
            .with_observer(channel);

        bus.emit(EventKind::Added, 5);

        assert_eq!(rx.try_recv().unwrap().id, 5);
    }

    #[test]
    fn observer_error_displays_its_message() {
        let err = ObserverError("event queue full".into());
        assert_eq!(err.to_string(), "event queue full");
        let _: &dyn std::error::Error = &err;
    }
}
