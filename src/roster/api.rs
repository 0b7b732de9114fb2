//! # API Facade
//!
//! [`Roster`] is the application context: it owns the record store, the
//! filter store, the event bus and the view coordinator, and it is the single
//! entry point for every UI.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** mutations to the owning store
//! - **Publishes** the events a mutation queued, after the store is fully
//!   updated, so every subscriber has reacted before the call returns
//! - **Returns structured types** (`CmdResult`), never strings for a terminal
//!
//! ## What the API Does NOT Do
//!
//! - **Matching or merging logic**: that lives in `engine`, `criteria` and `store`
//! - **I/O**, apart from reading a data file in [`Roster::load`]
//! - **Presentation**: renderers receive data, not text
//!
//! ## Wiring
//!
//! ```text
//! UI ──► Roster::toggle_filter ──► FilterStore::toggle ──► queued FilterToggled
//!                 │
//!                 └──► EventBus::publish ──► ViewCoordinator ──► Renderer
//! ```

use crate::bootstrap::Bootstrap;
use crate::config::RosterConfig;
use crate::coordinator::{compute_view, Renderer, View, ViewCoordinator};
use crate::error::Result;
use crate::events::{EventBus, EventKind, StoreEvent, Subscriber, SubscriptionId};
use crate::model::{Criteria, Fields, FilterRule, FilterRuleDraft, Record};
use crate::store::{Stores, UpsertReport};
use serde::Serialize;
use std::path::Path;
use tracing::{info, info_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Outcome of a toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub id: String,
    /// New state, or `None` if no rule had that id.
    pub enabled: Option<bool>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub records: Option<UpsertReport>,
    pub filters: Option<UpsertReport>,
    pub toggled: Option<ToggleOutcome>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, report: UpsertReport) -> Self {
        self.messages.extend(report_messages("record", &report));
        self.records = Some(report);
        self
    }

    pub fn with_filters(mut self, report: UpsertReport) -> Self {
        self.messages.extend(report_messages("filter rule", &report));
        self.filters = Some(report);
        self
    }

    /// Items skipped across both reports.
    pub fn skipped_count(&self) -> usize {
        [&self.records, &self.filters]
            .into_iter()
            .flatten()
            .map(UpsertReport::skipped_count)
            .sum()
    }
}

/// Whether a data delivery replaces the stores' contents or adds to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Upsert: ids missing from the data are removed.
    #[default]
    Replace,
    /// Merge only: nothing is removed.
    Extend,
}

/// The application context.
pub struct Roster {
    stores: Stores,
    bus: EventBus,
}

impl Roster {
    /// Builds empty stores and attaches a [`ViewCoordinator`] driving `renderer`.
    pub fn new<R: Renderer + 'static>(config: &RosterConfig, renderer: R) -> Self {
        let mut bus = EventBus::new();
        ViewCoordinator::attach(renderer, &mut bus);
        Self {
            stores: Stores::new(config.sort_field.clone()),
            bus,
        }
    }

    /// Feeds startup data into the stores: filters first, so the first record
    /// render already honours rules enabled in the data.
    pub fn bootstrap(&mut self, data: Bootstrap) -> CmdResult {
        self.deliver(data, LoadMode::Replace)
    }

    /// Feeds data delivered after startup. A section the data does not carry
    /// leaves its store untouched; an empty section empties it on `Replace`.
    pub fn deliver(&mut self, data: Bootstrap, mode: LoadMode) -> CmdResult {
        let span = info_span!("deliver", ?mode);
        let _guard = span.enter();

        let mut result = CmdResult::default();
        if let Some(filters) = data.filters {
            let outcome = match mode {
                LoadMode::Replace => self.upsert_filters(filters),
                LoadMode::Extend => self.extend_filters(filters),
            };
            result.messages.extend(outcome.messages);
            result.filters = outcome.filters;
        }
        if let Some(persons) = data.persons {
            let outcome = match mode {
                LoadMode::Replace => self.upsert_records(persons),
                LoadMode::Extend => self.extend_records(persons),
            };
            result.messages.extend(outcome.messages);
            result.records = outcome.records;
        }
        info!(
            records = self.stores.records.len(),
            filters = self.stores.filters.len(),
            skipped = result.skipped_count(),
            "delivered data"
        );
        result
    }

    /// Reads a data file and delivers it.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, mode: LoadMode) -> Result<CmdResult> {
        let data = Bootstrap::from_path(path)?;
        Ok(self.deliver(data, mode))
    }

    pub fn upsert_records(&mut self, batch: Vec<Fields>) -> CmdResult {
        let report = self.stores.records.upsert(batch);
        self.publish_record_events();
        CmdResult::default().with_records(report)
    }

    pub fn extend_records(&mut self, batch: Vec<Fields>) -> CmdResult {
        let report = self.stores.records.extend(batch);
        self.publish_record_events();
        CmdResult::default().with_records(report)
    }

    pub fn upsert_filters(&mut self, batch: Vec<FilterRuleDraft>) -> CmdResult {
        let report = self.stores.filters.upsert(batch);
        self.publish_filter_events();
        CmdResult::default().with_filters(report)
    }

    pub fn extend_filters(&mut self, batch: Vec<FilterRuleDraft>) -> CmdResult {
        let report = self.stores.filters.extend(batch);
        self.publish_filter_events();
        CmdResult::default().with_filters(report)
    }

    /// Flips a filter rule. An unknown id is reported but is not an error.
    pub fn toggle_filter(&mut self, id: &str) -> CmdResult {
        let enabled = self.stores.filters.toggle(id);
        self.publish_filter_events();

        let mut result = CmdResult::default();
        match enabled {
            Some(state) => {
                let label = self
                    .stores
                    .filters
                    .get(id)
                    .map(|rule| rule.label.clone())
                    .unwrap_or_default();
                let verb = if state { "Enabled" } else { "Disabled" };
                result.add_message(CmdMessage::success(format!("{verb} filter {id}: {label}")));
            }
            None => result.add_message(CmdMessage::info(format!("No filter rule with id {id}"))),
        }
        result.toggled = Some(ToggleOutcome {
            id: id.to_string(),
            enabled,
        });
        result
    }

    /// Registers an additional observer next to the view coordinator.
    pub fn subscribe<S>(&mut self, kinds: &[EventKind], handler: S) -> SubscriptionId
    where
        S: Subscriber + 'static,
    {
        self.bus.subscribe(kinds, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Records in display order, unfiltered.
    pub fn records(&self) -> Vec<Record> {
        self.stores.records.all()
    }

    /// Filter rules in display order.
    pub fn filters(&self) -> Vec<FilterRule> {
        self.stores.filters.all()
    }

    pub fn criteria(&self) -> Criteria {
        self.view().criteria
    }

    pub fn visible(&self) -> Vec<Record> {
        self.view().visible
    }

    pub fn view(&self) -> View {
        compute_view(&self.stores)
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    fn publish_record_events(&mut self) {
        let events = self.stores.records.take_events();
        self.publish(events);
    }

    fn publish_filter_events(&mut self) {
        let events = self.stores.filters.take_events();
        self.publish(events);
    }

    fn publish(&mut self, events: Vec<StoreEvent>) {
        for event in events {
            self.bus.publish(&event, &self.stores);
        }
    }
}

fn report_messages(noun: &str, report: &UpsertReport) -> Vec<CmdMessage> {
    let mut messages: Vec<CmdMessage> = report
        .skipped
        .iter()
        .map(|err| CmdMessage::warning(format!("Skipped: {err}")))
        .collect();
    if report.skipped_count() > 0 {
        let plural = if report.skipped_count() == 1 { "" } else { "s" };
        messages.push(CmdMessage::warning(format!(
            "{} malformed {noun}{plural} skipped",
            report.skipped_count()
        )));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::recording::RecordingRenderer;
    use crate::store::fixtures::{city_rule, fields, olsen_and_moss};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn roster() -> (Roster, Rc<RefCell<RecordingRenderer>>) {
        let renderer = Rc::new(RefCell::new(RecordingRenderer::default()));
        let roster = Roster::new(&RosterConfig::default(), Rc::clone(&renderer));
        (roster, renderer)
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(Record::id).collect()
    }

    #[test]
    fn portland_scenario() {
        let (mut roster, renderer) = roster();
        roster.bootstrap(
            Bootstrap::default()
                .with_persons(olsen_and_moss())
                .with_filters(vec![city_rule("f1", "portland", true, 1)]),
        );

        assert_eq!(ids(&roster.visible()), vec!["1"]);
        assert_eq!(renderer.borrow().last_ids(), vec!["1"]);

        roster.toggle_filter("f1");

        let visible = roster.visible();
        assert_eq!(ids(&visible), vec!["2", "1"]);
        assert_eq!(visible[0].get("lastName"), Some("Moss"));
        assert_eq!(renderer.borrow().last_ids(), vec!["2", "1"]);
    }

    #[test]
    fn bootstrap_renders_filters_before_records() {
        let (mut roster, renderer) = roster();
        roster.bootstrap(
            Bootstrap::default()
                .with_persons(olsen_and_moss())
                .with_filters(vec![city_rule("f1", "portland", true, 1)]),
        );

        let renderer = renderer.borrow();
        // One frame from the filter add, one from the records change.
        assert_eq!(renderer.record_frames.len(), 2);
        assert!(renderer.record_frames[0].is_empty());
        assert_eq!(renderer.filter_frames.len(), 1);
    }

    #[test]
    fn malformed_record_reports_skip_count() {
        let (mut roster, _) = roster();
        let result = roster.upsert_records(vec![
            fields(&[("id", "1"), ("lastName", "Olsen")]),
            fields(&[("lastName", "Ghost")]),
            fields(&[("id", "2"), ("lastName", "Moss")]),
        ]);

        assert_eq!(result.skipped_count(), 1);
        assert_eq!(roster.records().len(), 2);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("1 malformed record")));
    }

    #[test]
    fn toggle_off_and_on_restores_visible_set() {
        let (mut roster, _) = roster();
        roster.bootstrap(Bootstrap::default().with_persons(olsen_and_moss()).with_filters(vec![
            city_rule("f1", "portland", true, 1),
            city_rule("f2", "land", false, 2),
        ]));
        let before = roster.visible();

        roster.toggle_filter("f1");
        roster.toggle_filter("f1");

        assert_eq!(roster.visible(), before);
    }

    #[test]
    fn toggle_unknown_id_is_reported_not_failed() {
        let (mut roster, renderer) = roster();
        roster.bootstrap(Bootstrap::default().with_persons(olsen_and_moss()));
        let frames = renderer.borrow().record_frames.len();

        let result = roster.toggle_filter("ghost");

        assert_eq!(
            result.toggled,
            Some(ToggleOutcome {
                id: "ghost".into(),
                enabled: None
            })
        );
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(renderer.borrow().record_frames.len(), frames);
    }

    #[test]
    fn extend_adds_without_removing() {
        let (mut roster, _) = roster();
        roster.bootstrap(Bootstrap::default().with_persons(olsen_and_moss()));

        roster.deliver(
            Bootstrap::default().with_persons(vec![fields(&[("id", "3"), ("lastName", "Adams")])]),
            LoadMode::Extend,
        );

        assert_eq!(ids(&roster.visible()), vec!["3", "2", "1"]);
    }

    #[test]
    fn persons_only_refresh_keeps_filter_rules() {
        let (mut roster, _) = roster();
        roster.bootstrap(
            Bootstrap::default()
                .with_persons(olsen_and_moss())
                .with_filters(vec![city_rule("f1", "portland", true, 1)]),
        );

        let result = roster.deliver(
            Bootstrap::default().with_persons(vec![
                fields(&[("id", "1"), ("lastName", "Olsen"), ("city", "Portland")]),
                fields(&[("id", "2"), ("lastName", "Moss"), ("city", "Hollywood")]),
                fields(&[("id", "3"), ("lastName", "Adams"), ("city", "Salem")]),
            ]),
            LoadMode::Replace,
        );

        assert!(result.filters.is_none());
        assert_eq!(roster.filters().len(), 1);
        assert_eq!(ids(&roster.visible()), vec!["1"]);
    }

    #[test]
    fn empty_filters_section_clears_rules_on_replace() {
        let (mut roster, _) = roster();
        roster.bootstrap(
            Bootstrap::default()
                .with_persons(olsen_and_moss())
                .with_filters(vec![city_rule("f1", "portland", true, 1)]),
        );

        roster.deliver(Bootstrap::default().with_filters(Vec::new()), LoadMode::Replace);

        assert!(roster.filters().is_empty());
        assert_eq!(roster.records().len(), 2);
        assert_eq!(ids(&roster.visible()), vec!["2", "1"]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let (mut roster, renderer) = roster();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = roster.subscribe(
            &[EventKind::RecordsChanged],
            move |_: &StoreEvent, _: &Stores| *counter.borrow_mut() += 1,
        );
        roster.upsert_records(olsen_and_moss());

        assert!(roster.unsubscribe(id));
        roster.upsert_records(vec![fields(&[("id", "3"), ("lastName", "Adams")])]);

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(renderer.borrow().last_ids(), vec!["3"]);
        assert!(!roster.unsubscribe(id));
    }

    #[test]
    fn external_subscribers_run_before_mutation_returns() {
        let (mut roster, _) = roster();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        roster.subscribe(
            &[EventKind::RecordsChanged],
            move |_: &StoreEvent, stores: &Stores| {
                sink.borrow_mut().push(stores.records.len());
            },
        );

        roster.upsert_records(olsen_and_moss());

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn configured_sort_field_orders_visible_set() {
        let config = RosterConfig {
            sort_field: "city".into(),
            ..RosterConfig::default()
        };
        let mut roster = Roster::new(&config, RecordingRenderer::default());
        roster.upsert_records(olsen_and_moss());

        assert_eq!(roster.stores().records.sort_field(), "city");
        assert_eq!(ids(&roster.visible()), vec!["2", "1"]);
        assert_eq!(roster.visible()[0].get("city"), Some("Hollywood"));
    }

    #[test]
    fn load_reads_a_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(
            &path,
            r#"{"persons": [{"id": 1, "lastName": "Olsen"}, {"lastName": "NoId"}]}"#,
        )
        .unwrap();
        let (mut roster, _) = roster();

        let result = roster.load(&path, LoadMode::Replace).unwrap();

        assert_eq!(result.skipped_count(), 1);
        assert_eq!(roster.records().len(), 1);
    }
}
