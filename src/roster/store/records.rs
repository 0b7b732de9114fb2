use super::{drain, UpsertReport};
use crate::config::DEFAULT_SORT_FIELD;
use crate::error::RosterError;
use crate::events::StoreEvent;
use crate::model::{Fields, Record};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// The record set, keyed by `id`.
#[derive(Debug)]
pub struct RecordStore {
    records: HashMap<String, Record>,
    sort_field: String,
    outbox: Vec<StoreEvent>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD)
    }
}

impl RecordStore {
    pub fn new(sort_field: impl Into<String>) -> Self {
        Self {
            records: HashMap::new(),
            sort_field: sort_field.into(),
            outbox: Vec::new(),
        }
    }

    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    /// Merges `batch` by id and removes records the batch no longer carries.
    pub fn upsert<I>(&mut self, batch: I) -> UpsertReport
    where
        I: IntoIterator<Item = Fields>,
    {
        self.apply(batch, true)
    }

    /// Merges `batch` by id without removing anything.
    pub fn extend<I>(&mut self, batch: I) -> UpsertReport
    where
        I: IntoIterator<Item = Fields>,
    {
        self.apply(batch, false)
    }

    fn apply<I>(&mut self, batch: I, remove_missing: bool) -> UpsertReport
    where
        I: IntoIterator<Item = Fields>,
    {
        let mut report = UpsertReport::default();
        let mut seen = HashSet::new();
        let mut added_now = HashSet::new();

        for (position, fields) in batch.into_iter().enumerate() {
            let Some(incoming) = Record::from_fields(fields) else {
                warn!(position, "skipping record without id");
                report
                    .skipped
                    .push(RosterError::MalformedRecord { position });
                continue;
            };
            let id = incoming.id().to_string();
            seen.insert(id.clone());

            match self.records.get_mut(&id) {
                Some(existing) => {
                    let changed = existing.merge(incoming.into_fields());
                    if changed && !added_now.contains(&id) && !report.updated.contains(&id) {
                        report.updated.push(id);
                    }
                }
                None => {
                    self.records.insert(id.clone(), incoming);
                    added_now.insert(id.clone());
                    report.added.push(id);
                }
            }
        }

        if remove_missing {
            let mut stale: Vec<String> = self
                .records
                .keys()
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
            stale.sort();
            for id in &stale {
                self.records.remove(id);
            }
            report.removed = stale;
        }

        debug!(
            added = report.added.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            skipped = report.skipped_count(),
            "applied record batch"
        );

        if report.is_change() {
            self.outbox.push(StoreEvent::RecordsChanged);
        }
        report
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// Snapshot of every record, ascending by the sort field and then by id.
    ///
    /// Records without the sort field come first.
    pub fn all(&self) -> Vec<Record> {
        let mut all: Vec<Record> = self.records.values().cloned().collect();
        let field = self.sort_field.as_str();
        all.sort_by(|a, b| {
            a.get(field)
                .cmp(&b.get(field))
                .then_with(|| a.id().cmp(b.id()))
        });
        all
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Events queued by mutations since the last call.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        drain(&mut self.outbox)
    }
}
