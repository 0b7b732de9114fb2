//! # CLI Behavior
//!
//! This is **one possible UI client** for roster, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the library documentation in `lib.rs`.
//!
//! ## Commands
//!
//! Every data command takes a bootstrap file: a JSON object with `persons`
//! and `filters` arrays.
//!
//! - `roster show <FILE>`: the filter list, then the visible records.
//!   `--toggle ID` flips rules after loading; `--extend FILE` merges more data.
//! - `roster filters <FILE>`: just the filter list.
//! - `roster criteria <FILE>`: what the enabled rules add up to.
//! - `roster session <FILE>`: reads `toggle`, `load`, `extend`, `criteria`
//!   commands from stdin and prints every re-render as it happens. This is the
//!   closest the terminal gets to a live list.
//! - `roster config`: the effective configuration.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Template-based output and the terminal `Renderer`
//! - `setup`: Argument parsing via clap, session command parsing
//! - `styles`: Terminal styling
//! - `templates`: Output templates
//! - `logging`: tracing subscriber setup

mod commands;
mod logging;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
