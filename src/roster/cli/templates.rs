//! # CLI Templates
//!
//! Output is rendered from minijinja templates through `outstanding`. Templates
//! live as stand-alone files next to this module and are embedded here with
//! `include_str!`, so the binary stays self-contained.
//!
//! All templates strip whitespace around their tags and emit line breaks
//! explicitly with `{{ "\n" }}`. Column layout is computed in Rust
//! (`render.rs`); templates only pick styles and arrange pre-sized strings.
pub const RECORDS_TEMPLATE: &str = include_str!("templates/records.tmp");
pub const FILTERS_TEMPLATE: &str = include_str!("templates/filters.tmp");
pub const PAIRS_TEMPLATE: &str = include_str!("templates/pairs.tmp");
