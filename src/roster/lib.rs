//! # Roster Architecture
//!
//! Roster is a **UI-agnostic filtering core** for a list of people. It keeps two
//! collections, records and togglable filter rules, and re-derives the visible,
//! sorted subset of records whenever either changes. The terminal client in
//! `cli/` is one possible UI; the same core could drive a web page.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, reads data files    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - `Roster`: owns stores, event bus and view coordinator    │
//! │  - Publishes store events after each mutation               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Derivation (criteria.rs, engine.rs, coordinator.rs)        │
//! │  - Enabled rules → merged criteria → visible records        │
//! │  - Pure functions of current store state                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore, FilterStore: upsert-by-id, queued events    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Event Flow
//!
//! Everything is single-threaded and synchronous. A store mutation updates the
//! store, queues events, and the [`api::Roster`] publishes them on the
//! [`events::EventBus`] before returning. The [`coordinator::ViewCoordinator`]
//! is the bus's first subscriber: it recomputes the view and calls the
//! [`coordinator::Renderer`].
//!
//! | Event | Records re-rendered | Filters re-rendered |
//! |-------|---------------------|---------------------|
//! | `RecordsChanged` | yes | no |
//! | `FilterRuleAdded` | yes | yes |
//! | `FiltersChanged` | yes | yes |
//! | `FilterToggled` | yes | no |
//!
//! ## Malformed Input
//!
//! Nothing in the core is fatal. Inputs without an id are skipped and reported
//! in the [`store::UpsertReport`]; unknown criteria fields simply do not match;
//! toggling an unknown rule does nothing.
//!
//! ## Module Overview
//!
//! - [`api`]: The application context, entry point for all operations
//! - [`store`]: Record and filter-rule stores
//! - [`criteria`]: Merging enabled rules into one criteria map
//! - [`engine`]: Matching records against criteria
//! - [`coordinator`]: Keeping a renderer in sync with the stores
//! - [`events`]: Event kinds and the publish/subscribe bus
//! - [`bootstrap`]: JSON data format for startup and incremental loads
//! - [`model`]: `Record`, `FilterRule` and input types
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod coordinator;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod events;
pub mod model;
pub mod store;
