//! # Store Events
//!
//! Stores never call observers themselves. A mutation returns the events it
//! caused, and the owner of the stores (see [`crate::api::Roster`]) publishes
//! them on an [`EventBus`] once the store is fully updated.
//!
//! Every subscriber receives the event and a shared view of both stores. It can
//! read snapshots but cannot mutate either store, which keeps each store the
//! single writer of its own collection.

use crate::store::Stores;
use std::fmt;

/// Discriminant of [`StoreEvent`], used to select what a subscriber hears about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Record membership or contents changed.
    RecordsChanged,
    /// A filter rule was inserted for the first time.
    FilterRuleAdded,
    /// A filter rule's `enabled` flag was flipped.
    FilterToggled,
    /// Existing filter rules were updated or removed.
    FiltersChanged,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::RecordsChanged,
        EventKind::FilterRuleAdded,
        EventKind::FilterToggled,
        EventKind::FiltersChanged,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::RecordsChanged => "records-changed",
            EventKind::FilterRuleAdded => "filter-rule-added",
            EventKind::FilterToggled => "filter-toggled",
            EventKind::FiltersChanged => "filters-changed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    RecordsChanged,
    FilterRuleAdded { id: String },
    FilterToggled { id: String, enabled: bool },
    FiltersChanged,
}

impl StoreEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::RecordsChanged => EventKind::RecordsChanged,
            StoreEvent::FilterRuleAdded { .. } => EventKind::FilterRuleAdded,
            StoreEvent::FilterToggled { .. } => EventKind::FilterToggled,
            StoreEvent::FiltersChanged => EventKind::FiltersChanged,
        }
    }
}

/// Something that reacts to store events.
///
/// Implemented for any `FnMut(&StoreEvent, &Stores)` closure.
pub trait Subscriber {
    fn notify(&mut self, event: &StoreEvent, stores: &Stores);
}

impl<F> Subscriber for F
where
    F: FnMut(&StoreEvent, &Stores),
{
    fn notify(&mut self, event: &StoreEvent, stores: &Stores) {
        self(event, stores)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kinds: Vec<EventKind>,
    handler: Box<dyn Subscriber>,
}

/// Synchronous publish/subscribe dispatcher.
///
/// Subscribers run in registration order and each runs to completion before
/// the next one starts.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for the given event kinds.
    pub fn subscribe<S>(&mut self, kinds: &[EventKind], handler: S) -> SubscriptionId
    where
        S: Subscriber + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            kinds: kinds.to_vec(),
            handler: Box::new(handler),
        });
        id
    }

    /// Removes a subscription. Returns `false` if the handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Delivers `event` to every interested subscriber. Returns how many were notified.
    pub fn publish(&mut self, event: &StoreEvent, stores: &Stores) -> usize {
        let kind = event.kind();
        let mut notified = 0;
        for subscription in &mut self.subscriptions {
            if subscription.kinds.contains(&kind) {
                subscription.handler.notify(event, stores);
                notified += 1;
            }
        }
        tracing::trace!(event = %kind, notified, "published store event");
        notified
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
