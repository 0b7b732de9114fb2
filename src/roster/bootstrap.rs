//! # Bootstrap Data
//!
//! Startup and incremental data share one JSON shape:
//!
//! ```json
//! {
//!   "persons": [ { "id": 1, "firstName": "Sam", "lastName": "Olsen", "city": "Portland" } ],
//!   "filters": [ { "id": "f1", "label": "Portland", "criteria": { "city": "portland" }, "enabled": true } ]
//! }
//! ```
//!
//! Either key may be missing. A missing section is different from an empty
//! one: it leaves its store alone, while `"filters": []` clears the rules on a
//! replacing delivery. Conversion into store inputs is lenient on
//! purpose: the stores decide what is malformed, so an item that cannot be
//! read here still reaches the store (as an input without an id) and is
//! counted there.
//!
//! - Strings are kept, numbers and booleans become their JSON text, `null`
//!   means the field is absent.
//! - Arrays and objects are not string fields and are dropped.
//! - A filter's label may also be given as `name`.

use crate::error::{Result, RosterError};
use crate::model::{Fields, FilterRuleDraft, ID_FIELD};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct RawBootstrap {
    #[serde(default)]
    persons: Option<Vec<Value>>,
    #[serde(default)]
    filters: Option<Vec<Value>>,
}

/// Store inputs read from one bootstrap or incremental payload.
///
/// `None` means the payload did not carry that section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    pub persons: Option<Vec<Fields>>,
    pub filters: Option<Vec<FilterRuleDraft>>,
}

impl Bootstrap {
    pub fn with_persons(mut self, persons: Vec<Fields>) -> Self {
        self.persons = Some(persons);
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterRuleDraft>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(RosterError::Bootstrap(
                "expected a JSON object with `persons` and/or `filters`".to_string(),
            ));
        }
        let raw: RawBootstrap = serde_json::from_value(value)?;
        Ok(Self {
            persons: raw
                .persons
                .map(|persons| persons.iter().map(record_fields).collect()),
            filters: raw
                .filters
                .map(|filters| filters.iter().map(filter_draft).collect()),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let bootstrap = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            persons = bootstrap.persons.as_ref().map(Vec::len),
            filters = bootstrap.filters.as_ref().map(Vec::len),
            "read bootstrap data"
        );
        Ok(bootstrap)
    }
}

/// Converts one JSON person into a field map. Non-objects give an empty map.
pub fn record_fields(value: &Value) -> Fields {
    value.as_object().map(string_fields).unwrap_or_default()
}

/// Converts one JSON filter into a draft. Non-objects give a draft without an id.
pub fn filter_draft(value: &Value) -> FilterRuleDraft {
    let Some(object) = value.as_object() else {
        return FilterRuleDraft::default();
    };

    FilterRuleDraft {
        id: object.get(ID_FIELD).and_then(scalar_text),
        label: object
            .get("label")
            .or_else(|| object.get("name"))
            .and_then(scalar_text),
        criteria: object
            .get("criteria")
            .and_then(Value::as_object)
            .map(string_fields),
        enabled: object.get("enabled").and_then(Value::as_bool),
        order: object.get("order").and_then(Value::as_i64),
    }
}

fn string_fields(object: &Map<String, Value>) -> Fields {
    object
        .iter()
        .filter_map(|(key, value)| match scalar_text(value) {
            Some(text) => Some((key.clone(), text)),
            None => {
                if !value.is_null() {
                    debug!(field = %key, "dropping non-scalar field");
                }
                None
            }
        })
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
