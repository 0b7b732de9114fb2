use super::{drain, UpsertReport};
use crate::error::RosterError;
use crate::events::StoreEvent;
use crate::model::{FilterRule, FilterRuleDraft};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// The filter-rule set, keyed by `id`.
///
/// A rule's `enabled` flag is only ever changed by [`FilterStore::toggle`]:
/// upserts set it on first insertion and leave it alone afterwards.
#[derive(Debug, Default)]
pub struct FilterStore {
    rules: HashMap<String, FilterRule>,
    outbox: Vec<StoreEvent>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `batch` by id and removes rules the batch no longer carries.
    pub fn upsert<I>(&mut self, batch: I) -> UpsertReport
    where
        I: IntoIterator<Item = FilterRuleDraft>,
    {
        self.apply(batch, true)
    }

    /// Merges `batch` by id without removing anything.
    pub fn extend<I>(&mut self, batch: I) -> UpsertReport
    where
        I: IntoIterator<Item = FilterRuleDraft>,
    {
        self.apply(batch, false)
    }

    fn apply<I>(&mut self, batch: I, remove_missing: bool) -> UpsertReport
    where
        I: IntoIterator<Item = FilterRuleDraft>,
    {
        let mut report = UpsertReport::default();
        let mut seen = HashSet::new();
        let mut added_now = HashSet::new();

        for (position, draft) in batch.into_iter().enumerate() {
            let Some(id) = draft.id.clone().filter(|id| !id.is_empty()) else {
                warn!(position, "skipping filter rule without id");
                report
                    .skipped
                    .push(RosterError::MalformedFilterRule { position });
                continue;
            };
            seen.insert(id.clone());

            if let Some(rule) = self.rules.get_mut(&id) {
                let changed = update_rule(rule, draft);
                if changed && !added_now.contains(&id) && !report.updated.contains(&id) {
                    report.updated.push(id);
                }
                continue;
            }

            let order = draft.order.unwrap_or_else(|| self.next_order());
            let rule = FilterRule {
                label: draft.label.unwrap_or_else(|| id.clone()),
                criteria: draft.criteria.unwrap_or_default(),
                enabled: draft.enabled.unwrap_or(false),
                order,
                id: id.clone(),
            };
            self.rules.insert(id.clone(), rule);
            added_now.insert(id.clone());
            report.added.push(id);
        }

        if remove_missing {
            let mut stale: Vec<String> = self
                .rules
                .keys()
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
            stale.sort();
            for id in &stale {
                self.rules.remove(id);
            }
            report.removed = stale;
        }

        debug!(
            added = report.added.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            skipped = report.skipped_count(),
            "applied filter batch"
        );

        for id in &report.added {
            self.outbox
                .push(StoreEvent::FilterRuleAdded { id: id.clone() });
        }
        if !report.updated.is_empty() || !report.removed.is_empty() {
            self.outbox.push(StoreEvent::FiltersChanged);
        }
        report
    }

    /// Order given to a rule inserted without one: after every rule already stored.
    fn next_order(&self) -> i64 {
        self.rules
            .values()
            .map(|rule| rule.order)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Flips `enabled` on the rule with `id` and returns the new value.
    ///
    /// An unknown id is a no-op: the rule may have been removed while the UI
    /// still showed it.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let Some(rule) = self.rules.get_mut(id) else {
            debug!(id, "ignoring toggle of unknown filter rule");
            return None;
        };
        rule.enabled = !rule.enabled;
        let enabled = rule.enabled;
        debug!(id, enabled, "toggled filter rule");
        self.outbox.push(StoreEvent::FilterToggled {
            id: id.to_string(),
            enabled,
        });
        Some(enabled)
    }

    pub fn get(&self, id: &str) -> Option<&FilterRule> {
        self.rules.get(id)
    }

    /// Snapshot of every rule, ascending by order and then by id.
    pub fn all(&self) -> Vec<FilterRule> {
        let mut all: Vec<FilterRule> = self.rules.values().cloned().collect();
        all.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Events queued by mutations since the last call.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        drain(&mut self.outbox)
    }
}

fn update_rule(rule: &mut FilterRule, draft: FilterRuleDraft) -> bool {
    let mut changed = false;
    if let Some(label) = draft.label {
        if rule.label != label {
            rule.label = label;
            changed = true;
        }
    }
    if let Some(criteria) = draft.criteria {
        if rule.criteria != criteria {
            rule.criteria = criteria;
            changed = true;
        }
    }
    if let Some(order) = draft.order {
        if rule.order != order {
            rule.order = order;
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::city_rule;

    fn ids(rules: &[FilterRule]) -> Vec<&str> {
        rules.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn upsert_applies_defaults() {
        let mut store = FilterStore::new();
        store.upsert(vec![
            FilterRuleDraft::new("a").criterion("city", "portland"),
            FilterRuleDraft::new("b"),
        ]);

        let a = store.get("a").unwrap();
        assert!(!a.enabled);
        assert_eq!(a.label, "a");
        assert_eq!(a.order, 1);
        assert_eq!(store.get("b").unwrap().order, 2);
        assert!(store.get("b").unwrap().criteria.is_empty());
    }

    #[test]
    fn insertion_order_continues_after_explicit_orders() {
        let mut store = FilterStore::new();
        store.upsert(vec![
            city_rule("x", "portland", false, 10),
            FilterRuleDraft::new("y"),
        ]);

        assert_eq!(store.get("y").unwrap().order, 11);
    }

    #[test]
    fn all_sorts_by_order_then_id() {
        let mut store = FilterStore::new();
        store.upsert(vec![
            city_rule("c", "x", false, 2),
            city_rule("b", "y", false, 1),
            city_rule("a", "z", false, 2),
        ]);

        assert_eq!(ids(&store.all()), vec!["b", "a", "c"]);
    }

    #[test]
    fn emits_added_event_per_new_rule() {
        let mut store = FilterStore::new();
        store.upsert(vec![city_rule("f1", "portland", true, 1)]);
        store.take_events();

        store.upsert(vec![
            city_rule("f1", "portland", true, 1),
            city_rule("f2", "salem", false, 2),
        ]);

        assert_eq!(
            store.take_events(),
            vec![StoreEvent::FilterRuleAdded { id: "f2".into() }]
        );
    }

    #[test]
    fn update_and_removal_emit_filters_changed() {
        let mut store = FilterStore::new();
        store.upsert(vec![
            city_rule("f1", "portland", false, 1),
            city_rule("f2", "salem", false, 2),
        ]);
        store.take_events();

        let report = store.upsert(vec![city_rule("f1", "eugene", false, 1)]);

        assert_eq!(report.updated, vec!["f1"]);
        assert_eq!(report.removed, vec!["f2"]);
        assert_eq!(store.take_events(), vec![StoreEvent::FiltersChanged]);
        assert_eq!(store.get("f1").unwrap().criteria["city"], "eugene");
    }

    #[test]
    fn upsert_never_changes_enabled_of_existing_rule() {
        let mut store = FilterStore::new();
        store.upsert(vec![city_rule("f1", "portland", false, 1)]);

        store.upsert(vec![city_rule("f1", "portland", true, 1)]);

        assert!(!store.get("f1").unwrap().enabled);
    }

    #[test]
    fn toggle_flips_and_emits() {
        let mut store = FilterStore::new();
        store.upsert(vec![city_rule("f1", "portland", false, 1)]);
        store.take_events();

        assert_eq!(store.toggle("f1"), Some(true));
        assert_eq!(store.toggle("f1"), Some(false));
        assert_eq!(
            store.take_events(),
            vec![
                StoreEvent::FilterToggled {
                    id: "f1".into(),
                    enabled: true
                },
                StoreEvent::FilterToggled {
                    id: "f1".into(),
                    enabled: false
                },
            ]
        );
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut store = FilterStore::new();
        store.upsert(vec![city_rule("f1", "portland", false, 1)]);
        store.take_events();

        assert_eq!(store.toggle("missing"), None);
        assert!(store.take_events().is_empty());
        assert!(!store.get("f1").unwrap().enabled);
    }

    #[test]
    fn rule_without_id_is_skipped() {
        let mut store = FilterStore::new();
        let missing = FilterRuleDraft {
            label: Some("Orphan".into()),
            ..FilterRuleDraft::default()
        };
        let report = store.upsert(vec![missing, city_rule("f1", "portland", false, 1)]);

        assert_eq!(report.skipped_count(), 1);
        assert!(matches!(
            report.skipped[0],
            RosterError::MalformedFilterRule { position: 0 }
        ));
        assert_eq!(store.len(), 1);
    }
}
