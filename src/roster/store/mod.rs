//! # Storage Layer
//!
//! Two in-memory collections keyed by identity: [`records::RecordStore`] and
//! [`filters::FilterStore`]. Both follow the same upsert-by-`id` contract:
//!
//! - inputs with an id not yet in the store are **added**
//! - inputs matching an existing id **update** it (attributes present in the
//!   input overwrite, absent ones are kept)
//! - with [`upsert`](records::RecordStore::upsert), ids missing from the batch
//!   are **removed**; [`extend`](records::RecordStore::extend) skips that step
//!
//! An input without an id is not fatal. It is skipped and reported in the
//! returned [`UpsertReport`], and the rest of the batch is applied.
//!
//! ## Events
//!
//! A store never calls observers. After a mutation has fully updated its state
//! the store queues the resulting [`StoreEvent`]s, and the owner drains them
//! with `take_events()` and publishes them (see [`crate::events`]). This is what
//! makes mutations atomic with respect to observers.

use crate::error::RosterError;
use crate::events::StoreEvent;

pub mod filters;
pub mod records;

pub use filters::FilterStore;
pub use records::RecordStore;

/// Outcome of one upsert or extend.
#[derive(Debug, Default)]
pub struct UpsertReport {
    /// Ids inserted for the first time, in batch order.
    pub added: Vec<String>,
    /// Ids whose stored attributes changed, in batch order.
    pub updated: Vec<String>,
    /// Ids dropped because the batch no longer carried them, ascending.
    pub removed: Vec<String>,
    /// Items rejected for lacking an id.
    pub skipped: Vec<RosterError>,
}

impl UpsertReport {
    /// Whether the store's membership or contents changed.
    pub fn is_change(&self) -> bool {
        !(self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty())
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Read access to both collections, handed to event subscribers.
#[derive(Debug, Default)]
pub struct Stores {
    pub records: RecordStore,
    pub filters: FilterStore,
}

impl Stores {
    pub fn new(sort_field: impl Into<String>) -> Self {
        Self {
            records: RecordStore::new(sort_field),
            filters: FilterStore::new(),
        }
    }
}

pub(crate) fn drain(outbox: &mut Vec<StoreEvent>) -> Vec<StoreEvent> {
    std::mem::take(outbox)
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Fields, FilterRuleDraft};

    /// Builds a field map from literal pairs.
    pub fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// A person record input with the fields the list UI shows.
    pub fn person(id: &str, first: &str, last: &str, city: &str, state: &str) -> Fields {
        fields(&[
            ("id", id),
            ("firstName", first),
            ("lastName", last),
            ("city", city),
            ("state", state),
        ])
    }

    /// The two-person data set used by the view scenarios.
    pub fn olsen_and_moss() -> Vec<Fields> {
        vec![
            fields(&[("id", "1"), ("lastName", "Olsen"), ("city", "Portland")]),
            fields(&[("id", "2"), ("lastName", "Moss"), ("city", "Hollywood")]),
        ]
    }

    pub fn city_rule(id: &str, city: &str, enabled: bool, order: i64) -> FilterRuleDraft {
        FilterRuleDraft::new(id)
            .label(format!("In {city}"))
            .criterion("city", city)
            .enabled(enabled)
            .order(order)
    }
}
