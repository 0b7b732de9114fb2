//! # View Coordination
//!
//! [`ViewCoordinator`] keeps an external [`Renderer`] in sync with the stores.
//! It subscribes once, at construction, and on every relevant event:
//!
//! 1. aggregates the criteria of the enabled filter rules
//! 2. filters the sorted record snapshot with them
//! 3. hands the visible records to the renderer
//! 4. hands the full rule list to the renderer as well, but only when rules
//!    were added, updated or removed
//!
//! Toggling a rule never changes which rows the filter list has, so a toggle
//! only re-renders records.

use crate::criteria;
use crate::engine;
use crate::events::{EventBus, EventKind, StoreEvent, Subscriber, SubscriptionId};
use crate::model::{Criteria, FilterRule, Record};
use crate::store::Stores;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug_span;

/// The UI side of the coordinator. Both calls are synchronous and cannot fail.
pub trait Renderer {
    fn render_records(&mut self, visible: &[Record]);
    fn render_filters(&mut self, rules: &[FilterRule]);
}

/// Lets a UI keep a handle on its renderer while the coordinator owns a clone.
impl<R: Renderer + ?Sized> Renderer for Rc<RefCell<R>> {
    fn render_records(&mut self, visible: &[Record]) {
        self.borrow_mut().render_records(visible)
    }

    fn render_filters(&mut self, rules: &[FilterRule]) {
        self.borrow_mut().render_filters(rules)
    }
}

/// Derived state: the aggregate criteria and the records they let through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub criteria: Criteria,
    pub visible: Vec<Record>,
}

/// Recomputes the derived view from the current store contents.
pub fn compute_view(stores: &Stores) -> View {
    let criteria = criteria::aggregate(&stores.filters.all());
    let visible = engine::filter(&stores.records.all(), &criteria);
    View { criteria, visible }
}

pub struct ViewCoordinator<R> {
    renderer: R,
}

impl<R: Renderer + 'static> ViewCoordinator<R> {
    /// Event kinds the coordinator reacts to.
    pub const EVENTS: [EventKind; 4] = [
        EventKind::RecordsChanged,
        EventKind::FilterRuleAdded,
        EventKind::FilterToggled,
        EventKind::FiltersChanged,
    ];

    /// Creates the coordinator and subscribes it to `bus`.
    pub fn attach(renderer: R, bus: &mut EventBus) -> SubscriptionId {
        bus.subscribe(&Self::EVENTS, Self { renderer })
    }
}

impl<R: Renderer> ViewCoordinator<R> {
    fn react(&mut self, event: &StoreEvent, stores: &Stores) {
        let span = debug_span!("recompute_view", event = %event.kind());
        let _guard = span.enter();

        let view = compute_view(stores);
        tracing::debug!(
            criteria = view.criteria.len(),
            visible = view.visible.len(),
            total = stores.records.len(),
            "recomputed visible set"
        );
        self.renderer.render_records(&view.visible);

        match event {
            StoreEvent::FilterRuleAdded { .. } | StoreEvent::FiltersChanged => {
                self.renderer.render_filters(&stores.filters.all());
            }
            StoreEvent::RecordsChanged | StoreEvent::FilterToggled { .. } => {}
        }
    }
}

impl<R: Renderer> Subscriber for ViewCoordinator<R> {
    fn notify(&mut self, event: &StoreEvent, stores: &Stores) {
        self.react(event, stores)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod recording {
    use super::Renderer;
    use crate::model::{FilterRule, Record};

    /// Renderer that keeps every frame it was asked to draw.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub record_frames: Vec<Vec<Record>>,
        pub filter_frames: Vec<Vec<FilterRule>>,
    }

    impl RecordingRenderer {
        pub fn last_ids(&self) -> Vec<String> {
            self.record_frames
                .last()
                .map(|frame| frame.iter().map(|r| r.id().to_string()).collect())
                .unwrap_or_default()
        }
    }

    impl Renderer for RecordingRenderer {
        fn render_records(&mut self, visible: &[Record]) {
            self.record_frames.push(visible.to_vec());
        }

        fn render_filters(&mut self, rules: &[FilterRule]) {
            self.filter_frames.push(rules.to_vec());
        }
    }
}
